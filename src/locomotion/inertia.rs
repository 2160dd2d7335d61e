//! Inertia accumulation, braking and drag.

use log::debug;

use super::LocomotionController;
use crate::mover::KinematicMover;
use crate::transform::RiderTransform;

impl LocomotionController {
    /// Adds `amount` to inertia.
    ///
    /// Sliding backwards past [`reverse_threshold`] spins the rider half a
    /// turn and flips the slide into forward speed. The result is always held
    /// within `[-reverse_cap, max_movement]`.
    ///
    /// [`reverse_threshold`]: crate::config::LocomotionConfig::reverse_threshold
    pub fn add_movement(&mut self, amount: f32, rider: &mut RiderTransform) {
        let mut inertia = self.state.inertia + amount;
        if inertia < -self.config.reverse_threshold {
            rider.rotation.add_yaw(180.0);
            debug!("rider slid backwards at {inertia:.2}; turning to face the slope");
            inertia = -inertia;
        }
        self.state.inertia = self.clamp_inertia(inertia);
    }

    /// Removes `amount` of forward speed.
    ///
    /// Braking to or through zero halts the rider outright: inertia becomes
    /// exactly zero and `mover` is told to stop.
    pub fn brake<M>(&mut self, amount: f32, mover: &mut M)
    where
        M: KinematicMover + ?Sized,
    {
        let inertia = self.state.inertia - amount;
        if inertia <= 0.0 {
            self.state.inertia = 0.0;
            mover.stop_immediately();
            debug!("brake brought rider to a full stop");
        } else {
            self.state.inertia = self.clamp_inertia(inertia);
        }
    }

    /// Sheds ground drag for `delta_seconds`, pulling inertia towards zero from
    /// either side without crossing it.
    pub(super) fn apply_ground_drag(&mut self, delta_seconds: f32, rider: &mut RiderTransform) {
        let inertia = self.state.inertia;
        if inertia == 0.0 {
            return;
        }
        let drag = (self.config.ground_drag * delta_seconds).min(inertia.abs());
        self.add_movement(-inertia.signum() * drag, rider);
    }

    pub(super) fn clamp_inertia(&self, inertia: f32) -> f32 {
        inertia.clamp(-self.config.reverse_cap, self.config.max_movement)
    }
}
