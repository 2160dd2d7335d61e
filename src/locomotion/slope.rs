//! Terrain slope sampling under the board.

use glam::Vec3;

use super::LocomotionController;
use crate::probe::{CollisionChannel, CollisionProbe};
use crate::transform::{RiderTransform, Socket};
use crate::vector_math::slope_between;

impl LocomotionController {
    /// Samples the terrain ahead of and behind the board and stores the slope.
    ///
    /// Two downward casts straddle the board at
    /// [`slope_detection_distance`] along the rider's facing. When either
    /// misses, or the hits share a horizontal position, the slope is flat.
    /// Orientation is left untouched.
    ///
    /// [`slope_detection_distance`]: crate::config::LocomotionConfig::slope_detection_distance
    pub fn sample_slope<P>(&mut self, rider: &RiderTransform, probe: &P) -> f32
    where
        P: CollisionProbe + ?Sized,
    {
        let board = rider.socket_location(&self.config.sockets, Socket::Board);
        let reach = rider.rotation.forward() * self.config.slope_detection_distance;

        let slope = self
            .cast_ground(board + reach, probe)
            .and_then(|ahead| {
                self.cast_ground(board - reach, probe)
                    .map(|behind| slope_between(ahead, behind))
            })
            .unwrap_or(0.0);

        self.state.current_slope = slope;
        slope
    }

    fn cast_ground<P>(&self, sample: Vec3, probe: &P) -> Option<Vec3>
    where
        P: CollisionProbe + ?Sized,
    {
        let window = Vec3::Z * self.config.slope_probe_half_height;
        probe
            .cast_ray(sample + window, sample - window, CollisionChannel::WorldStatic)
            .impact()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::LocomotionConfig;
    use crate::locomotion::LocomotionController;
    use crate::probe::{CollisionChannel, MockCollisionProbe, ProbeResult};
    use crate::transform::{RiderTransform, SocketLayout};
    use approx::assert_relative_eq;
    use glam::Vec3;
    use mockall::predicate::{always, eq};
    use mockall::Sequence;
    use rstest::{fixture, rstest};

    #[fixture]
    fn controller() -> LocomotionController {
        let config = LocomotionConfig {
            sockets: SocketLayout {
                board: Vec3::ZERO,
                ..SocketLayout::default()
            },
            ..LocomotionConfig::default()
        };
        LocomotionController::new(config).expect("valid config")
    }

    fn probe_with(ahead: ProbeResult, behind: ProbeResult) -> MockCollisionProbe {
        let mut probe = MockCollisionProbe::new();
        let mut sequence = Sequence::new();
        probe
            .expect_cast_ray()
            .with(always(), always(), eq(CollisionChannel::WorldStatic))
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(ahead);
        probe
            .expect_cast_ray()
            .with(always(), always(), eq(CollisionChannel::WorldStatic))
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(behind);
        probe
    }

    #[rstest]
    fn rise_over_distance_between_hits(mut controller: LocomotionController) {
        let ahead = Vec3::new(2400.0_f32.sqrt(), 0.0, 10.0);
        let probe = probe_with(
            ProbeResult::hit(ahead, Vec3::Z),
            ProbeResult::hit(Vec3::ZERO, Vec3::Z),
        );

        let slope = controller.sample_slope(&RiderTransform::default(), &probe);

        assert_relative_eq!(slope, 0.2, epsilon = 1e-5);
        assert_relative_eq!(controller.current_slope(), 0.2, epsilon = 1e-5);
    }

    #[rstest]
    fn forward_miss_skips_second_cast(mut controller: LocomotionController) {
        controller.state.current_slope = 0.4;
        let mut probe = MockCollisionProbe::new();
        probe
            .expect_cast_ray()
            .times(1)
            .return_const(ProbeResult::miss());

        controller.sample_slope(&RiderTransform::default(), &probe);

        assert_eq!(controller.current_slope(), 0.0);
    }

    #[rstest]
    fn backward_miss_flattens(mut controller: LocomotionController) {
        controller.state.current_slope = -0.3;
        let probe = probe_with(
            ProbeResult::hit(Vec3::new(50.0, 0.0, 5.0), Vec3::Z),
            ProbeResult::miss(),
        );

        controller.sample_slope(&RiderTransform::default(), &probe);

        assert_eq!(controller.current_slope(), 0.0);
    }

    #[rstest]
    fn coincident_hits_are_flat(mut controller: LocomotionController) {
        let probe = probe_with(
            ProbeResult::hit(Vec3::new(3.0, 3.0, 20.0), Vec3::Z),
            ProbeResult::hit(Vec3::new(3.0, 3.0, 0.0), Vec3::Z),
        );

        controller.sample_slope(&RiderTransform::default(), &probe);

        assert_eq!(controller.current_slope(), 0.0);
    }

    #[rstest]
    fn casts_span_the_vertical_window(mut controller: LocomotionController) {
        let rider = RiderTransform::new(Vec3::new(100.0, 0.0, 20.0), 90.0);
        let mut probe = MockCollisionProbe::new();
        probe
            .expect_cast_ray()
            .withf(|from, to, _| {
                (*from - Vec3::new(100.0, 50.0, 70.0)).length() < 1e-3
                    && (*to - Vec3::new(100.0, 50.0, -30.0)).length() < 1e-3
            })
            .times(1)
            .return_const(ProbeResult::miss());

        controller.sample_slope(&rider, &probe);
    }
}
