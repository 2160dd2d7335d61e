//! Kinematic movement integration.
//!
//! [`KinematicMover`] is what the locomotion controller talks to.
//! [`SimpleMover`] is a small reference integrator used by the headless host
//! and the behaviour tests: it turns accumulated movement input into ground
//! velocity, applies gravity while airborne and snaps onto the floor.

use glam::{Quat, Vec3};
use log::debug;

use crate::probe::{CollisionChannel, CollisionProbe};
use crate::transform::RiderTransform;
use crate::vector_math::safe_normalize;
use crate::{
    CAPSULE_HALF_HEIGHT, GRAVITY_Z, GROUND_SNAP_DISTANCE, JUMP_Z_VELOCITY, MAX_MOVEMENT,
    MAX_STEP_HEIGHT, MAX_WALK_SPEED,
};

/// Character movement integrator driven by the locomotion controller.
#[cfg_attr(test, mockall::automock)]
pub trait KinematicMover {
    /// Whether the character stands on a walkable surface.
    fn is_grounded(&self) -> bool;
    /// Queues movement along `direction`, scaled by `scale`, for the next step.
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);
    /// Zeroes velocity and drops any queued input.
    fn stop_immediately(&mut self);
    /// Asks for a jump on the next step.
    fn request_jump(&mut self);
    /// Turns the current velocity about the world up axis.
    fn rotate_velocity(&mut self, yaw_degrees: f32);
}

/// Reference [`KinematicMover`] with capsule-centred floor snapping.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleMover {
    velocity: Vec3,
    pending_input: Vec3,
    grounded: bool,
    jump_requested: bool,
    /// Ground speed per unit of movement input per second.
    pub speed_per_input: f32,
    /// Vertical speed given by a jump.
    pub jump_z_velocity: f32,
}

impl Default for SimpleMover {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            pending_input: Vec3::ZERO,
            grounded: false,
            jump_requested: false,
            speed_per_input: MAX_WALK_SPEED / MAX_MOVEMENT,
            jump_z_velocity: JUMP_Z_VELOCITY,
        }
    }
}

impl SimpleMover {
    /// Current velocity in world units per second.
    #[must_use]
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Overrides the current velocity.
    pub const fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Marks the mover as standing or falling without integrating.
    pub const fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Advances `rider` by `delta_seconds` over the static geometry in `probe`.
    ///
    /// Queued input is consumed into horizontal velocity. Horizontal motion
    /// stops against walls taller than [`MAX_STEP_HEIGHT`]; the feet snap onto
    /// floors within the step height above or [`GROUND_SNAP_DISTANCE`] below.
    pub fn integrate<P>(&mut self, rider: &mut RiderTransform, probe: &P, delta_seconds: f32)
    where
        P: CollisionProbe + ?Sized,
    {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return;
        }

        let input = std::mem::take(&mut self.pending_input);
        let drive = input / delta_seconds * self.speed_per_input;
        self.velocity.x = drive.x;
        self.velocity.y = drive.y;

        if std::mem::take(&mut self.jump_requested) && self.grounded {
            self.velocity.z = self.jump_z_velocity;
            self.grounded = false;
            debug!("jump launched at {:?}", rider.location);
        }
        if !self.grounded {
            self.velocity.z += GRAVITY_Z * delta_seconds;
        }

        self.block_against_walls(rider, probe, delta_seconds);
        rider.location += self.velocity * delta_seconds;
        self.settle_on_floor(rider, probe);
    }

    fn block_against_walls<P>(&mut self, rider: &RiderTransform, probe: &P, delta_seconds: f32)
    where
        P: CollisionProbe + ?Sized,
    {
        let horizontal = Vec3::new(self.velocity.x, self.velocity.y, 0.0);
        let Some(direction) = safe_normalize(horizontal) else {
            return;
        };
        let feet = rider.location - Vec3::Z * CAPSULE_HALF_HEIGHT;
        let start = feet + Vec3::Z * (MAX_STEP_HEIGHT + 1.0);
        let reach = horizontal * delta_seconds + direction;
        let hit = probe.cast_ray(start, start + reach, CollisionChannel::WorldStatic);
        if !hit.hit {
            return;
        }
        let flat_normal = Vec3::new(hit.normal.x, hit.normal.y, 0.0);
        if let Some(normal) = safe_normalize(flat_normal) {
            let into_wall = self.velocity.dot(normal).min(0.0);
            self.velocity -= normal * into_wall;
        }
    }

    fn settle_on_floor<P>(&mut self, rider: &mut RiderTransform, probe: &P)
    where
        P: CollisionProbe + ?Sized,
    {
        if self.velocity.z > 0.0 {
            self.grounded = false;
            return;
        }
        let feet = rider.location - Vec3::Z * CAPSULE_HALF_HEIGHT;
        let floor = probe
            .cast_ray(
                feet + Vec3::Z * MAX_STEP_HEIGHT,
                feet - Vec3::Z * GROUND_SNAP_DISTANCE,
                CollisionChannel::WorldStatic,
            )
            .impact();
        self.grounded = floor.is_some();
        if let Some(point) = floor {
            rider.location.z = point.z + CAPSULE_HALF_HEIGHT;
            self.velocity.z = 0.0;
        }
    }
}

impl KinematicMover for SimpleMover {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        if let Some(unit) = safe_normalize(direction) {
            self.pending_input += unit * scale;
        }
    }

    fn stop_immediately(&mut self) {
        self.velocity = Vec3::ZERO;
        self.pending_input = Vec3::ZERO;
    }

    fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    fn rotate_velocity(&mut self, yaw_degrees: f32) {
        self.velocity = Quat::from_rotation_z(yaw_degrees.to_radians()) * self.velocity;
    }
}
