//! Ray casting against the collision world.

use glam::Vec3;

/// Collision channel a cast is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionChannel {
    /// Static level geometry. Locomotion probes only use this channel.
    #[default]
    WorldStatic,
    /// Moving objects and platforms.
    WorldDynamic,
}

/// Outcome of a single cast.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProbeResult {
    /// Whether any geometry was struck.
    pub hit: bool,
    /// Impact point in world space. Meaningless on a miss.
    pub location: Vec3,
    /// Surface normal at the impact point. Meaningless on a miss.
    pub normal: Vec3,
}

impl ProbeResult {
    /// A cast that struck nothing.
    #[must_use]
    pub const fn miss() -> Self {
        Self {
            hit: false,
            location: Vec3::ZERO,
            normal: Vec3::ZERO,
        }
    }

    /// A cast that struck geometry at `location`.
    #[must_use]
    pub const fn hit(location: Vec3, normal: Vec3) -> Self {
        Self {
            hit: true,
            location,
            normal,
        }
    }

    /// Impact point, if the cast hit.
    #[must_use]
    pub const fn impact(&self) -> Option<Vec3> {
        if self.hit {
            Some(self.location)
        } else {
            None
        }
    }
}

/// Synchronous ray queries against the collision world.
///
/// Implementations must answer within the call; there are no deferred casts.
#[cfg_attr(test, mockall::automock)]
pub trait CollisionProbe {
    /// Casts a segment from `from` to `to` and reports the first impact.
    fn cast_ray(&self, from: Vec3, to: Vec3, channel: CollisionChannel) -> ProbeResult;
}

impl<P: CollisionProbe + ?Sized> CollisionProbe for &P {
    fn cast_ray(&self, from: Vec3, to: Vec3, channel: CollisionChannel) -> ProbeResult {
        (**self).cast_ray(from, to, channel)
    }
}
