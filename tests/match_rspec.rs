//! Behavioural tests for a complete short match: score volumes award the
//! rider, the clock counts down, and the HUD ends on the final score.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::sync::MutexGuard;
use std::time::Duration;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use skatepark::hud::EndGameDisplay;
use skatepark::match_clock::MatchPhase;
use skatepark::{
    spawn_skater, BlockTerrain, Hud, LocomotionConfig, MatchClock, MatchTimeUpdated,
    RiderPose, RiderTransform, ScoreBoard, ScoreVolume, StartMatch,
};
use thread_safe_app::{lock_app, share, SharedApp, ThreadSafeApp};

const FRAME: Duration = Duration::from_millis(100);
const MATCH_SECS: u32 = 2;
const VOLUME_POINTS: i32 = 100;

#[derive(Resource, Default, Debug)]
struct HeardTimes(Vec<u32>);

#[derive(Resource, Debug)]
struct Played;

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn record_time(event: On<MatchTimeUpdated>, mut heard: ResMut<HeardTimes>) {
    heard.0.push(event.event().remaining);
}

#[derive(Debug, Clone)]
struct MatchFixture {
    app: SharedApp,
    rider: Entity,
}

impl MatchFixture {
    fn bootstrap() -> Self {
        let mut app = test_utils::headless_app(BlockTerrain::default(), MATCH_SECS, FRAME);
        app.init_resource::<HeardTimes>();
        app.add_observer(record_time);

        let world = app.world_mut();
        world.spawn(ScoreVolume::new(
            Vec3::new(0.0, 0.0, 96.0),
            Vec3::splat(100.0),
            VOLUME_POINTS,
            "Manual",
        ));
        // Stands in the volume without being a rider.
        world.spawn(RiderPose(RiderTransform::new(Vec3::new(10.0, 0.0, 96.0), 0.0)));
        let rider = spawn_skater(
            world,
            LocomotionConfig::default(),
            RiderTransform::new(Vec3::new(0.0, 0.0, 96.0), 0.0),
        )
        .expect("default config is valid");
        world.trigger(StartMatch);

        Self {
            app: share(app),
            rider,
        }
    }

    fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// Plays past the end of the match once; later calls do nothing.
    fn play_out(&self) {
        let mut app = self.app_guard();
        if app.world().contains_resource::<Played>() {
            return;
        }
        let frames = MATCH_SECS * 10 + 5;
        for _ in 0..frames {
            app.update();
        }
        app.insert_resource(Played);
    }

    fn score(&self) -> i32 {
        self.app_guard().world().resource::<ScoreBoard>().total()
    }

    fn hud(&self) -> Hud {
        self.app_guard().world().resource::<Hud>().clone()
    }

    fn heard_times(&self) -> Vec<u32> {
        self.app_guard().world().resource::<HeardTimes>().0.clone()
    }

    fn phase(&self) -> MatchPhase {
        self.app_guard().world().resource::<MatchClock>().phase()
    }

    fn rider_location(&self) -> Vec3 {
        self.app_guard()
            .world()
            .get::<RiderPose>(self.rider)
            .map(|pose| pose.location)
            .expect("rider has a pose")
    }
}

#[test]
fn short_match_plays_to_the_end_screen() {
    let fixture = MatchFixture::bootstrap();
    run_serial(&rspec::given(
        "a two second match with a rider standing in a score volume",
        fixture,
        |scenario: &mut Scenario<MatchFixture>| {
            scenario.then("the HUD starts on the playing screen", |state| {
                let hud = state.hud();
                let display = hud.player().expect("overlay showing");
                assert_eq!(display.remaining_secs, MATCH_SECS);
                assert_eq!(display.total_score, 0);
            });

            scenario.when("the match runs past its end", |ctx| {
                ctx.before_each(|state| state.play_out());

                ctx.then("the rider scored once and the bystander never", |state| {
                    assert_eq!(state.score(), VOLUME_POINTS);
                });

                ctx.then("the clock counted down each second and finished", |state| {
                    assert_eq!(state.heard_times(), vec![2, 1, 0]);
                    assert_eq!(state.phase(), MatchPhase::Finished);
                });

                ctx.then("the HUD shows the final score", |state| {
                    assert_eq!(
                        state.hud(),
                        Hud::EndGame(EndGameDisplay {
                            final_score: VOLUME_POINTS,
                        })
                    );
                });

                ctx.then("the idle rider stayed on the ground", |state| {
                    test_utils::assert_vec3_near(
                        state.rider_location(),
                        Vec3::new(0.0, 0.0, 96.0),
                        1e-3,
                    );
                });
            });
        },
    ));
}

#[test]
fn re_entering_a_volume_scores_again() {
    let fixture = MatchFixture::bootstrap();
    let mut app = fixture.app_guard();
    app.update();
    assert_eq!(app.world().resource::<ScoreBoard>().total(), VOLUME_POINTS);

    let rider = fixture.rider;
    let move_rider = |target: &mut ThreadSafeApp, to: Vec3| {
        let mut pose = target
            .world_mut()
            .get_mut::<RiderPose>(rider)
            .expect("rider has a pose");
        pose.location = to;
    };

    move_rider(&mut *app, Vec3::new(0.0, 1000.0, 96.0));
    app.update();
    move_rider(&mut *app, Vec3::new(0.0, 0.0, 96.0));
    app.update();

    assert_eq!(
        app.world().resource::<ScoreBoard>().total(),
        VOLUME_POINTS * 2
    );
}
