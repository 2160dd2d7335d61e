//! Terrain fixtures and headless app construction.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use skatepark::{Block, BlockTerrain, SkateparkPlugins};

/// Shorthand for a [`Block`].
#[must_use]
pub const fn block(id: i64, x: i32, y: i32, z: i32) -> Block {
    Block { id, x, y, z }
}

/// App with `MinimalPlugins`, every gameplay plugin and a fixed frame step.
///
/// Plugins are finished so the caller can `update()` straight away. Time only
/// advances from the second update onwards.
#[must_use]
pub fn headless_app(terrain: BlockTerrain, match_duration_secs: u32, frame: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SkateparkPlugins {
            match_duration_secs,
        })
        .insert_resource(terrain)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame));
    app.finish();
    app.cleanup();
    app
}
