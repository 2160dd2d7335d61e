#![cfg_attr(docsrs, feature(doc_cfg))]
//! Skateboard gameplay: slope-following locomotion plus the score, match and
//! HUD systems around it.
//!
//! The [`locomotion`] module is engine-agnostic and driven through the
//! [`CollisionProbe`] and [`KinematicMover`] traits. The remaining modules
//! wire it into a Bevy `App`.
pub mod components;
pub mod config;
pub mod constants;
pub mod hud;
pub mod locomotion;
pub mod logging;
pub mod match_clock;
pub mod mover;
pub mod plugin;
pub mod probe;
pub mod score;
pub mod skater;
pub mod terrain;
pub mod transform;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use components::{Movement, RiderPose, Skater, SkaterInput};
pub use config::{ConfigError, GameConfig, LocomotionConfig};
pub use hud::{Hud, HudPlugin};
pub use locomotion::{ControlRotation, LocomotionController, RiderState};
pub use logging::init as init_logging;
pub use match_clock::{MatchClock, MatchFinished, MatchPlugin, MatchTimeUpdated, StartMatch};
pub use mover::{KinematicMover, SimpleMover};
pub use plugin::{SkateparkPlugins, SkateparkSet};
pub use probe::{CollisionChannel, CollisionProbe, ProbeResult};
pub use score::{AwardPoints, ScoreBoard, ScorePlugin, ScoreVolume, Scored};
pub use skater::{spawn_skater, RiderPossessed, SkaterPlugin};
pub use terrain::{Block, BlockSlope, BlockTerrain};
pub use transform::{RiderTransform, Rotator, Socket, SocketLayout};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use skatepark::prelude::*;
    //! ```

    pub use crate::CollisionProbe;
    pub use crate::KinematicMover;
    pub use crate::LocomotionConfig;
    pub use crate::LocomotionController;
    pub use crate::ProbeResult;
    pub use crate::RiderTransform;
    pub use crate::SkateparkPlugins;
    pub use glam::{Vec2, Vec3};
}
