//! ECS component types used by the game.
//! Wraps the engine-agnostic rider types so Bevy systems can query them.
use bevy::prelude::*;

use crate::locomotion::LocomotionController;
use crate::mover::SimpleMover;
use crate::transform::RiderTransform;

/// Player-controlled rider and its locomotion state.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct Skater(pub LocomotionController);

/// World pose of a rider.
#[derive(Component, Debug, Clone, Copy, Default, Deref, DerefMut)]
pub struct RiderPose(pub RiderTransform);

/// Kinematic integrator moving a rider through the terrain.
#[derive(Component, Debug, Clone, Default, Deref, DerefMut)]
pub struct Movement(pub SimpleMover);

/// Input written by the input layer and consumed once per frame.
///
/// Axes are held values and are forwarded every frame while non-zero. The
/// jump flags are edges and are cleared after being handled.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct SkaterInput {
    /// Turn (`x`) and push/brake (`y`).
    pub move_axis: Vec2,
    /// Camera yaw (`x`) and pitch (`y`).
    pub look_axis: Vec2,
    /// Jump button went down this frame.
    pub jump_pressed: bool,
    /// Jump button came up this frame.
    pub jump_released: bool,
}
