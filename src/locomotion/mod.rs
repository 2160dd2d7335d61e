//! Slope-following skateboard locomotion.
//!
//! [`LocomotionController`] owns the per-rider [`RiderState`] and the
//! validated [`LocomotionConfig`]. The host drives it once per simulation step
//! through [`LocomotionController::tick`] and forwards input events to
//! the `on_*` handlers. Collision queries and movement integration are
//! injected per call as [`CollisionProbe`] and [`KinematicMover`]
//! implementations, so the controller holds no references into the host.

mod inertia;
mod input;
mod slope;
mod wall;

use log::warn;

use crate::config::{ConfigError, LocomotionConfig};
use crate::mover::KinematicMover;
use crate::probe::CollisionProbe;
use crate::transform::RiderTransform;
use crate::vector_math::pitch_from_slope;

pub use input::ControlRotation;

/// Per-frame locomotion state of one rider.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiderState {
    /// Signed speed along the facing direction.
    pub inertia: f32,
    /// Sine of the terrain incline under the board.
    pub current_slope: f32,
    /// Set between jump press and release.
    pub preparing_jump: bool,
}

/// Skateboard locomotion for a single rider.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionController {
    config: LocomotionConfig,
    state: RiderState,
    control_rotation: ControlRotation,
}

impl LocomotionController {
    /// Creates a controller at rest.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found by
    /// [`LocomotionConfig::validate`].
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: RiderState::default(),
            control_rotation: ControlRotation::default(),
        })
    }

    /// Tunables this controller was built with.
    #[must_use]
    pub const fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Current locomotion state.
    #[must_use]
    pub const fn state(&self) -> &RiderState {
        &self.state
    }

    /// Signed forward speed.
    #[must_use]
    pub const fn inertia(&self) -> f32 {
        self.state.inertia
    }

    /// Slope sine sampled on the last grounded tick.
    #[must_use]
    pub const fn current_slope(&self) -> f32 {
        self.state.current_slope
    }

    /// Whether a jump is being held.
    #[must_use]
    pub const fn is_preparing_jump(&self) -> bool {
        self.state.preparing_jump
    }

    /// Camera orientation driven by look input.
    #[must_use]
    pub const fn control_rotation(&self) -> ControlRotation {
        self.control_rotation
    }

    /// Advances locomotion by one simulation step.
    ///
    /// While grounded the rider bounces off walls, resamples the slope, gains
    /// or loses speed along it and sheds [`LocomotionConfig::ground_drag`].
    /// Inertia is fed to `mover` every step, grounded or not, and the rider is
    /// pitched to match the slope with roll held at zero. Negative or
    /// non-finite deltas are rejected without side effects.
    pub fn tick<M, P>(
        &mut self,
        delta_seconds: f32,
        rider: &mut RiderTransform,
        mover: &mut M,
        probe: &P,
    ) where
        M: KinematicMover + ?Sized,
        P: CollisionProbe + ?Sized,
    {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            warn!("ignoring locomotion tick with delta {delta_seconds}");
            return;
        }

        if mover.is_grounded() {
            self.check_walls(rider, probe);
            self.sample_slope(rider, probe);
            let slope_impulse =
                -self.state.current_slope * self.config.slope_gravity_intensity * delta_seconds;
            self.add_movement(slope_impulse, rider);
            self.apply_ground_drag(delta_seconds, rider);
        }

        mover.add_movement_input(rider.rotation.forward(), self.state.inertia * delta_seconds);
        self.align_to_slope(rider);
    }

    /// Pitches the rider to the current slope and levels its roll.
    pub fn align_to_slope(&self, rider: &mut RiderTransform) {
        rider.rotation.pitch =
            pitch_from_slope(self.state.current_slope, self.config.max_slope_angle);
        rider.rotation.roll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::MockKinematicMover;
    use crate::probe::{MockCollisionProbe, ProbeResult};
    use approx::assert_relative_eq;
    use glam::Vec3;
    use mockall::predicate::always;
    use rstest::{fixture, rstest};

    #[fixture]
    fn controller() -> LocomotionController {
        LocomotionController::new(LocomotionConfig::default()).expect("default config is valid")
    }

    fn missing_probe() -> MockCollisionProbe {
        let mut probe = MockCollisionProbe::new();
        probe.expect_cast_ray().returning(|_, _, _| ProbeResult::miss());
        probe
    }

    #[rstest]
    fn invalid_config_is_rejected() {
        let config = LocomotionConfig {
            max_movement: -10.0,
            ..LocomotionConfig::default()
        };
        assert!(LocomotionController::new(config).is_err());
    }

    #[rstest]
    fn airborne_tick_skips_probes_but_keeps_drifting(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        controller.add_movement(40.0, &mut rider);

        let mut mover = MockKinematicMover::new();
        mover.expect_is_grounded().return_const(false);
        mover
            .expect_add_movement_input()
            .withf(|direction, scale| {
                (*direction - Vec3::X).length() < 1e-5 && (*scale - 4.0).abs() < 1e-5
            })
            .times(1)
            .return_const(());
        let mut probe = MockCollisionProbe::new();
        probe.expect_cast_ray().never();

        controller.tick(0.1, &mut rider, &mut mover, &probe);

        assert_relative_eq!(controller.inertia(), 40.0);
    }

    #[rstest]
    fn grounded_flat_tick_applies_drag(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        controller.add_movement(10.0, &mut rider);

        let mut mover = MockKinematicMover::new();
        mover.expect_is_grounded().return_const(true);
        mover
            .expect_add_movement_input()
            .with(always(), always())
            .times(1)
            .return_const(());

        controller.tick(1.0, &mut rider, &mut mover, &missing_probe());

        assert_relative_eq!(controller.inertia(), 9.9, epsilon = 1e-5);
        assert_eq!(controller.current_slope(), 0.0);
    }

    #[rstest]
    fn drag_never_reverses_a_stationary_rider(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        let mut mover = MockKinematicMover::new();
        mover.expect_is_grounded().return_const(true);
        mover.expect_add_movement_input().return_const(());

        for _ in 0..100 {
            controller.tick(1.0, &mut rider, &mut mover, &missing_probe());
        }

        assert_eq!(controller.inertia(), 0.0);
        assert_relative_eq!(rider.rotation.yaw, 0.0);
    }

    #[rstest]
    #[case::negative(-0.1)]
    #[case::nan(f32::NAN)]
    #[case::infinite(f32::INFINITY)]
    fn bad_delta_is_ignored(mut controller: LocomotionController, #[case] delta: f32) {
        let mut rider = RiderTransform::default();
        controller.add_movement(10.0, &mut rider);
        let mut mover = MockKinematicMover::new();
        mover.expect_is_grounded().never();
        mover.expect_add_movement_input().never();

        controller.tick(delta, &mut rider, &mut mover, &missing_probe());

        assert_relative_eq!(controller.inertia(), 10.0);
    }

    #[rstest]
    fn alignment_clamps_pitch_and_levels_roll(mut controller: LocomotionController) {
        let mut rider = RiderTransform::default();
        rider.rotation.roll = 12.0;
        controller.state.current_slope = 0.95;

        controller.align_to_slope(&mut rider);

        assert_relative_eq!(rider.rotation.pitch, 60.0);
        assert_eq!(rider.rotation.roll, 0.0);
    }
}
