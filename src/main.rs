//! Headless skatepark session runner.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;
use skatepark::{
    init_logging, spawn_skater, Block, BlockTerrain, GameConfig, Hud, RiderPose, RiderTransform,
    ScoreBoard, ScoreVolume, Skater, SkaterInput, SkateparkPlugins, StartMatch,
};

/// Headless skatepark session
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Simulated seconds to run; defaults to one second past the match end
    #[arg(short, long)]
    seconds: Option<f32>,
    /// Simulation frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

fn demo_park() -> BlockTerrain {
    let block = |id, x, y, z| Block { id, x, y, z };
    BlockTerrain::default()
        .with_ramp(block(1, 3, 0, -1), 0.3, 0.0)
        .with_block(block(2, 10, 0, 0))
        .with_block(block(3, 10, 0, 1))
}

fn spawn_score_volumes(world: &mut World) {
    world.spawn(ScoreVolume::new(
        Vec3::new(650.0, 50.0, 100.0),
        Vec3::new(50.0, 100.0, 100.0),
        100,
        "Gap",
    ));
    world.spawn(ScoreVolume::new(
        Vec3::new(350.0, 50.0, 150.0),
        Vec3::new(50.0, 100.0, 50.0),
        250,
        "Ramp air",
    ));
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(args.fps > 0, "--fps must be positive");

    let config = args.config.as_deref().map_or_else(
        || Ok(GameConfig::default()),
        |path| {
            GameConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))
        },
    )?;
    let seconds = args
        .seconds
        .unwrap_or(config.match_duration_secs as f32 + 1.0);
    ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "--seconds must be a non-negative number"
    );

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SkateparkPlugins {
            match_duration_secs: config.match_duration_secs,
        })
        .insert_resource(demo_park())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / f64::from(args.fps),
        )));
    app.finish();
    app.cleanup();

    spawn_score_volumes(app.world_mut());
    let rider = spawn_skater(
        app.world_mut(),
        config.locomotion,
        RiderTransform::new(Vec3::new(50.0, 50.0, 96.0), 0.0),
    )
    .context("spawning rider")?;
    app.world_mut()
        .entity_mut(rider)
        .insert(SkaterInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..SkaterInput::default()
        });
    app.world_mut().trigger(StartMatch);

    // Truncation is intended; a partial frame is not simulated.
    let frames = (seconds * args.fps as f32) as u64;
    for _ in 0..frames {
        app.update();
    }

    let world = app.world();
    if let (Some(pose), Some(skater)) = (world.get::<RiderPose>(rider), world.get::<Skater>(rider)) {
        info!(
            "rider at {:?} facing {:.1}°, inertia {:.2}",
            pose.location,
            pose.rotation.yaw,
            skater.inertia()
        );
    }
    info!("score: {}", world.resource::<ScoreBoard>().total());
    info!("hud: {:?}", world.resource::<Hud>());
    Ok(())
}
