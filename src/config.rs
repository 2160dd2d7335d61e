//! Tunable gameplay configuration.
//!
//! Settings are authored as JSON, validated once at startup and treated as
//! read-only afterwards. Missing fields fall back to the defaults in
//! [`crate::constants`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::SocketLayout;
use crate::{
    GROUND_DRAG, MATCH_DURATION_SECS, MAX_MOVEMENT, MAX_SLOPE_ANGLE, REVERSE_CAP,
    REVERSE_THRESHOLD, ROTATION_SPEED, SLOPE_DETECTION_DISTANCE, SLOPE_GRAVITY_INTENSITY,
    SLOPE_PROBE_HALF_HEIGHT, WALL_DAMPING, WALL_PROBE_DISTANCE, WALL_PROBE_HALF_HEIGHT,
};

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// A numeric field lies outside its permitted range.
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
        /// Human-readable bound.
        requirement: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// A socket offset contains a NaN or infinite component.
    #[error("socket offsets must be finite")]
    NonFiniteSocket,
    /// Matches must last at least one second.
    #[error("match duration must be at least one second")]
    ZeroMatchDuration,
}

/// Locomotion tunables for one rider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocomotionConfig {
    /// Upper bound on forward inertia.
    pub max_movement: f32,
    /// Acceleration per unit of slope sine.
    pub slope_gravity_intensity: f32,
    /// Offset of the terrain samples ahead of and behind the board.
    pub slope_detection_distance: f32,
    /// Half of the vertical window each terrain sample spans.
    pub slope_probe_half_height: f32,
    /// Steepest pitch, in degrees, the rider adopts.
    pub max_slope_angle: f32,
    /// Forward speed removed per second while grounded.
    pub ground_drag: f32,
    /// Yaw in degrees per unit of turn input.
    pub rotation_speed: f32,
    /// Most negative inertia allowed.
    pub reverse_cap: f32,
    /// Backward slide that triggers a half turn.
    pub reverse_threshold: f32,
    /// Reach of the wall probes.
    pub wall_probe_distance: f32,
    /// Vertical offset of the high and low wall probes.
    pub wall_probe_half_height: f32,
    /// Fraction of inertia kept after a wall bounce.
    pub wall_damping: f32,
    /// Attachment sockets on the rider.
    pub sockets: SocketLayout,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_movement: MAX_MOVEMENT,
            slope_gravity_intensity: SLOPE_GRAVITY_INTENSITY,
            slope_detection_distance: SLOPE_DETECTION_DISTANCE,
            slope_probe_half_height: SLOPE_PROBE_HALF_HEIGHT,
            max_slope_angle: MAX_SLOPE_ANGLE,
            ground_drag: GROUND_DRAG,
            rotation_speed: ROTATION_SPEED,
            reverse_cap: REVERSE_CAP,
            reverse_threshold: REVERSE_THRESHOLD,
            wall_probe_distance: WALL_PROBE_DISTANCE,
            wall_probe_half_height: WALL_PROBE_HALF_HEIGHT,
            wall_damping: WALL_DAMPING,
            sockets: SocketLayout::default(),
        }
    }
}

const fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn at_least(field: &'static str, value: f32, min: f32, requirement: &'static str) -> Result<(), ConfigError> {
    if finite(field, value)? < min {
        return Err(ConfigError::OutOfRange {
            field,
            requirement,
            value,
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? <= 0.0 {
        return Err(ConfigError::OutOfRange {
            field,
            requirement: "greater than zero",
            value,
        });
    }
    Ok(())
}

fn within(field: &'static str, value: f32, max: f32, requirement: &'static str) -> Result<(), ConfigError> {
    at_least(field, value, 0.0, requirement)?;
    if value > max {
        return Err(ConfigError::OutOfRange {
            field,
            requirement,
            value,
        });
    }
    Ok(())
}

impl LocomotionConfig {
    /// Checks every field, returning the first violation.
    ///
    /// # Errors
    /// Returns [`ConfigError::NonFinite`], [`ConfigError::OutOfRange`] or
    /// [`ConfigError::NonFiniteSocket`] describing the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_movement", self.max_movement)?;
        at_least(
            "slope_gravity_intensity",
            self.slope_gravity_intensity,
            0.0,
            "zero or greater",
        )?;
        positive("slope_detection_distance", self.slope_detection_distance)?;
        positive("slope_probe_half_height", self.slope_probe_half_height)?;
        within("max_slope_angle", self.max_slope_angle, 90.0, "between 0 and 90 degrees")?;
        at_least("ground_drag", self.ground_drag, 0.0, "zero or greater")?;
        finite("rotation_speed", self.rotation_speed)?;
        at_least("reverse_cap", self.reverse_cap, 0.0, "zero or greater")?;
        within(
            "reverse_threshold",
            self.reverse_threshold,
            self.reverse_cap,
            "between 0 and reverse_cap",
        )?;
        positive("wall_probe_distance", self.wall_probe_distance)?;
        at_least(
            "wall_probe_half_height",
            self.wall_probe_half_height,
            0.0,
            "zero or greater",
        )?;
        within("wall_damping", self.wall_damping, 1.0, "between 0 and 1")?;
        if !self.sockets.is_finite() {
            return Err(ConfigError::NonFiniteSocket);
        }
        Ok(())
    }
}

/// Top-level game configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Rider locomotion tunables.
    pub locomotion: LocomotionConfig,
    /// Length of a match in whole seconds.
    pub match_duration_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            match_duration_secs: MATCH_DURATION_SECS,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// any validation error raised by [`GameConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use skatepark::config::GameConfig;
    /// let config = GameConfig::from_json_str(r#"{ "match_duration_secs": 60 }"#).unwrap();
    /// assert_eq!(config.match_duration_secs, 60);
    /// assert_eq!(config.locomotion.max_movement, 100.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON file at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`GameConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validates the locomotion tunables and the match length.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroMatchDuration`] for a zero-length match and
    /// any error from [`LocomotionConfig::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        if self.match_duration_secs == 0 {
            return Err(ConfigError::ZeroMatchDuration);
        }
        Ok(())
    }
}
