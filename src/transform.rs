//! Rider pose: world location, orientation and attachment sockets.
//!
//! The world is Z-up. A [`Rotator`] with zero yaw faces +X, positive pitch
//! lifts the nose and positive yaw turns towards +Y. All angles are degrees.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::vector_math::normalize_degrees;
use crate::CAPSULE_HALF_HEIGHT;

/// Orientation expressed as yaw, pitch and roll in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    /// Rotation about the world up axis.
    pub yaw: f32,
    /// Nose-up rotation about the rider's right axis.
    pub pitch: f32,
    /// Bank about the forward axis.
    pub roll: f32,
}

impl Rotator {
    /// Builds a rotator from its components.
    #[must_use]
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Quaternion applying roll, then pitch, then yaw.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
            * Quat::from_rotation_y(-self.pitch.to_radians())
            * Quat::from_rotation_x(self.roll.to_radians())
    }

    /// Unit vector the rider faces, including pitch.
    #[must_use]
    pub fn forward(self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        Vec3::new(pitch_cos * yaw_cos, pitch_cos * yaw_sin, pitch_sin)
    }

    /// Horizontal unit vector of the current yaw.
    #[must_use]
    pub fn heading(self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(yaw_cos, yaw_sin, 0.0)
    }

    /// Rider up vector, including pitch and roll.
    #[must_use]
    pub fn up(self) -> Vec3 {
        self.to_quat() * Vec3::Z
    }

    /// Turns about the world up axis, keeping yaw within `(-180, 180]`.
    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw = normalize_degrees(self.yaw + degrees);
    }
}

/// Attachment points on the rider's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Socket {
    /// Where the board is mounted; terrain is sampled around it.
    Board,
    /// Left foot on the board.
    LeftFoot,
    /// Right foot on the board.
    RightFoot,
}

/// Local offsets of each [`Socket`] relative to the rider centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketLayout {
    /// Board mount point.
    pub board: Vec3,
    /// Left foot placement.
    pub left_foot: Vec3,
    /// Right foot placement.
    pub right_foot: Vec3,
}

impl Default for SocketLayout {
    fn default() -> Self {
        let feet = -CAPSULE_HALF_HEIGHT + 10.0;
        Self {
            board: Vec3::new(0.0, 0.0, -CAPSULE_HALF_HEIGHT),
            left_foot: Vec3::new(15.0, -8.0, feet),
            right_foot: Vec3::new(-15.0, 8.0, feet),
        }
    }
}

impl SocketLayout {
    /// Offset of `socket` in the rider's local frame.
    #[must_use]
    pub const fn offset(&self, socket: Socket) -> Vec3 {
        match socket {
            Socket::Board => self.board,
            Socket::LeftFoot => self.left_foot,
            Socket::RightFoot => self.right_foot,
        }
    }

    /// Returns `true` when every offset is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.board.is_finite() && self.left_foot.is_finite() && self.right_foot.is_finite()
    }
}

/// World-space pose of the rider capsule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiderTransform {
    /// Capsule centre.
    pub location: Vec3,
    /// Facing.
    pub rotation: Rotator,
}

impl RiderTransform {
    /// Places a rider at `location` facing `yaw` degrees.
    #[must_use]
    pub const fn new(location: Vec3, yaw: f32) -> Self {
        Self {
            location,
            rotation: Rotator::new(yaw, 0.0, 0.0),
        }
    }

    /// Converts a local `offset` into a world position.
    #[must_use]
    pub fn to_world(&self, offset: Vec3) -> Vec3 {
        self.location + self.rotation.to_quat() * offset
    }

    /// World position of `socket` under `layout`.
    #[must_use]
    pub fn socket_location(&self, layout: &SocketLayout, socket: Socket) -> Vec3 {
        self.to_world(layout.offset(socket))
    }
}
