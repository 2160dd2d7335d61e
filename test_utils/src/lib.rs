//! Utility helpers for tests.
//!
//! Fakes for the collision and movement seams, terrain fixtures and a
//! headless Bevy app builder shared by the integration suites.
pub mod fakes;
pub mod park;

pub use fakes::{RecordingMover, ScriptedProbe, TiltedGround};
pub use park::{block, headless_app};

use glam::Vec3;

/// Assert that two vectors agree component-wise within `tolerance`.
///
/// # Panics
/// Panics with both vectors when any component differs by more than
/// `tolerance`.
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff.max_element() <= tolerance,
        "expected {expected:?}, got {actual:?} (tolerance {tolerance})"
    );
}
