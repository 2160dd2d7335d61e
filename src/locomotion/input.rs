//! Input handlers and socket accessors.
//!
//! Handlers run once per input event, not per frame, so turn amounts do not
//! depend on frame rate.

use glam::{Vec2, Vec3};
use log::warn;

use super::LocomotionController;
use crate::mover::KinematicMover;
use crate::transform::{RiderTransform, Socket};
use crate::vector_math::normalize_degrees;
use crate::MAX_LOOK_PITCH;

/// Camera orientation driven by the look axis, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlRotation {
    /// Camera yaw.
    pub yaw: f32,
    /// Camera pitch, limited to `±MAX_LOOK_PITCH`.
    pub pitch: f32,
}

impl LocomotionController {
    /// Handles the move axis: `y` pushes or brakes, `x` turns.
    ///
    /// Ignored while airborne or when either component is not finite.
    /// Turning yaws the rider by `rotation_speed * x` and rotates the mover's
    /// velocity to match.
    pub fn on_move<M>(&mut self, axis: Vec2, rider: &mut RiderTransform, mover: &mut M)
    where
        M: KinematicMover + ?Sized,
    {
        if !axis.is_finite() {
            warn!("ignoring move input {axis:?}");
            return;
        }
        if !mover.is_grounded() {
            return;
        }

        if axis.y > 0.0 {
            self.add_movement(axis.y, rider);
        } else if axis.y < 0.0 {
            self.brake(-axis.y, mover);
        }

        if axis.x != 0.0 {
            let yaw = self.config.rotation_speed * axis.x;
            rider.rotation.add_yaw(yaw);
            mover.rotate_velocity(yaw);
        }
    }

    /// Handles the look axis by steering the camera only.
    ///
    /// Non-finite input is ignored.
    pub fn on_look(&mut self, axis: Vec2) {
        if !axis.is_finite() {
            warn!("ignoring look input {axis:?}");
            return;
        }
        let control = &mut self.control_rotation;
        control.yaw = normalize_degrees(control.yaw + axis.x);
        control.pitch = (control.pitch + axis.y).clamp(-MAX_LOOK_PITCH, MAX_LOOK_PITCH);
    }

    /// Starts charging a jump.
    pub const fn on_jump_pressed(&mut self) {
        self.state.preparing_jump = true;
    }

    /// Releases the jump and asks the mover to leave the ground.
    pub fn on_jump_released<M>(&mut self, mover: &mut M)
    where
        M: KinematicMover + ?Sized,
    {
        self.state.preparing_jump = false;
        mover.request_jump();
    }

    /// World position of `socket` on `rider`.
    #[must_use]
    pub fn socket_location(&self, rider: &RiderTransform, socket: Socket) -> Vec3 {
        rider.socket_location(&self.config.sockets, socket)
    }

    /// World position of the left foot, for foot placement.
    #[must_use]
    pub fn left_foot_location(&self, rider: &RiderTransform) -> Vec3 {
        self.socket_location(rider, Socket::LeftFoot)
    }

    /// World position of the right foot, for foot placement.
    #[must_use]
    pub fn right_foot_location(&self, rider: &RiderTransform) -> Vec3 {
        self.socket_location(rider, Socket::RightFoot)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::LocomotionConfig;
    use crate::locomotion::LocomotionController;
    use crate::mover::MockKinematicMover;
    use crate::transform::RiderTransform;
    use approx::assert_relative_eq;
    use glam::Vec2;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn controller() -> LocomotionController {
        LocomotionController::new(LocomotionConfig::default()).expect("valid config")
    }

    fn grounded_mover() -> MockKinematicMover {
        let mut mover = MockKinematicMover::new();
        mover.expect_is_grounded().return_const(true);
        mover
    }

    #[rstest]
    fn push_adds_inertia(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        let mut mover = grounded_mover();

        controller.on_move(Vec2::new(0.0, 0.8), &mut rider, &mut mover);

        assert_relative_eq!(controller.inertia(), 0.8);
    }

    #[rstest]
    fn pull_brakes(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        controller.add_movement(5.0, &mut rider);
        let mut mover = grounded_mover();
        mover.expect_stop_immediately().never();

        controller.on_move(Vec2::new(0.0, -1.0), &mut rider, &mut mover);

        assert_relative_eq!(controller.inertia(), 4.0);
    }

    #[rstest]
    fn turn_yaws_rider_and_velocity(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        let mut mover = grounded_mover();
        mover
            .expect_rotate_velocity()
            .with(eq(1.5))
            .times(1)
            .return_const(());

        controller.on_move(Vec2::new(1.0, 0.0), &mut rider, &mut mover);

        assert_relative_eq!(rider.rotation.yaw, 1.5);
        assert_eq!(controller.inertia(), 0.0);
    }

    #[rstest]
    fn airborne_input_is_ignored(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        let mut mover = MockKinematicMover::new();
        mover.expect_is_grounded().return_const(false);
        mover.expect_rotate_velocity().never();

        controller.on_move(Vec2::new(1.0, 1.0), &mut rider, &mut mover);

        assert_eq!(controller.inertia(), 0.0);
        assert_eq!(rider.rotation.yaw, 0.0);
    }

    #[rstest]
    #[case::nan_turn(Vec2::new(f32::NAN, 0.0))]
    #[case::infinite_push(Vec2::new(0.0, f32::INFINITY))]
    fn non_finite_move_is_ignored(mut controller: LocomotionController, #[case] axis: Vec2) {
        let mut rider = RiderTransform::default();
        let mut mover = MockKinematicMover::new();
        mover.expect_is_grounded().never();
        mover.expect_rotate_velocity().never();

        controller.on_move(axis, &mut rider, &mut mover);

        assert_eq!(rider.rotation.yaw, 0.0);
        assert_eq!(controller.inertia(), 0.0);
    }

    #[rstest]
    fn non_finite_look_keeps_camera(mut controller: LocomotionController) {
        controller.on_look(Vec2::new(20.0, 5.0));
        controller.on_look(Vec2::new(f32::NAN, f32::NEG_INFINITY));

        let control = controller.control_rotation();
        assert_relative_eq!(control.yaw, 20.0);
        assert_relative_eq!(control.pitch, 5.0);
    }

    #[rstest]
    fn look_moves_camera_only(mut controller: LocomotionController) {
        controller.on_look(Vec2::new(30.0, 120.0));

        let control = controller.control_rotation();
        assert_relative_eq!(control.yaw, 30.0);
        assert_relative_eq!(control.pitch, 89.0);
        assert_eq!(controller.inertia(), 0.0);
    }

    #[rstest]
    fn jump_press_then_release(mut controller: LocomotionController) {
        let mut mover = MockKinematicMover::new();
        mover.expect_request_jump().times(1).return_const(());

        controller.on_jump_pressed();
        assert!(controller.is_preparing_jump());

        controller.on_jump_released(&mut mover);
        assert!(!controller.is_preparing_jump());
    }
}
