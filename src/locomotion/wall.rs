//! Wall bounces.

use glam::Vec3;
use log::debug;

use super::LocomotionController;
use crate::probe::{CollisionChannel, CollisionProbe};
use crate::transform::RiderTransform;
use crate::vector_math::{reflect, safe_normalize, yaw_degrees};

impl LocomotionController {
    /// Bounces the rider off a wall directly ahead.
    ///
    /// A high and a low probe reach [`wall_probe_distance`] along the
    /// horizontal heading. On a hit, inertia becomes
    /// `-dot(heading, normal) * inertia * wall_damping` and the rider turns to
    /// the mirror image of its heading about the wall. Returns whether a wall
    /// was struck; a miss changes nothing.
    ///
    /// [`wall_probe_distance`]: crate::config::LocomotionConfig::wall_probe_distance
    pub fn check_walls<P>(&mut self, rider: &mut RiderTransform, probe: &P) -> bool
    where
        P: CollisionProbe + ?Sized,
    {
        let heading = rider.rotation.heading();
        let reach = heading * self.config.wall_probe_distance;
        let offset = Vec3::Z * self.config.wall_probe_half_height;

        let Some(hit) = [rider.location + offset, rider.location - offset]
            .into_iter()
            .map(|start| probe.cast_ray(start, start + reach, CollisionChannel::WorldStatic))
            .find(|result| result.hit)
        else {
            return false;
        };

        let normal = safe_normalize(hit.normal).unwrap_or(-heading);
        let dot = heading.dot(normal);
        let bounced = -dot * self.state.inertia * self.config.wall_damping;
        self.state.inertia = self.clamp_inertia(bounced);

        if let Some(yaw) = yaw_degrees(reflect(heading, normal)) {
            rider.rotation.yaw = yaw;
        }
        debug!(
            "wall hit at {:?}; inertia now {:.2}, yaw {:.1}",
            hit.location, self.state.inertia, rider.rotation.yaw
        );
        true
    }
}
