//! Gameplay tuning constants used across systems.
//!
//! Distances are in world units (centimetres), angles in degrees and times in
//! seconds. The world is Z-up.

/// Upper bound on forward inertia.
pub const MAX_MOVEMENT: f32 = 100.0;
/// Scale applied to the slope sine when converting it into acceleration.
///
/// Equivalent to a quarter unit per degree of incline for shallow slopes.
pub const SLOPE_GRAVITY_INTENSITY: f32 = 0.25 * 57.295_78;
/// Distance ahead of and behind the board at which terrain is sampled.
pub const SLOPE_DETECTION_DISTANCE: f32 = 50.0;
/// Half of the vertical window spanned by each terrain sample.
pub const SLOPE_PROBE_HALF_HEIGHT: f32 = 50.0;
/// Steepest pitch the rider visually adopts.
pub const MAX_SLOPE_ANGLE: f32 = 60.0;
/// Forward speed shed per second while grounded.
pub const GROUND_DRAG: f32 = 0.1;
/// Yaw applied per unit of turn input.
pub const ROTATION_SPEED: f32 = 1.5;
/// Most negative inertia the rider can hold.
pub const REVERSE_CAP: f32 = 2.0;
/// Backward slide beyond which the rider spins round to face downhill.
pub const REVERSE_THRESHOLD: f32 = 1.0;
/// Reach of the wall probes in front of the rider.
pub const WALL_PROBE_DISTANCE: f32 = 60.0;
/// Vertical offset of the high and low wall probes from the rider centre.
pub const WALL_PROBE_HALF_HEIGHT: f32 = 40.0;
/// Fraction of inertia kept after bouncing off a wall.
pub const WALL_DAMPING: f32 = 0.5;
/// Limit on camera pitch in either direction.
pub const MAX_LOOK_PITCH: f32 = 89.0;

/// Half height of the rider capsule; the rider location is the capsule centre.
pub const CAPSULE_HALF_HEIGHT: f32 = 96.0;
/// Vertical take-off speed of a jump.
pub const JUMP_Z_VELOCITY: f32 = 400.0;
/// Gravitational acceleration along Z.
pub const GRAVITY_Z: f32 = -980.0;
/// Ground speed reached at full inertia.
pub const MAX_WALK_SPEED: f32 = 1000.0;
/// Height of ledges the mover steps onto without stopping.
pub const MAX_STEP_HEIGHT: f32 = 45.0;
/// Distance below the feet still treated as standing on the floor.
pub const GROUND_SNAP_DISTANCE: f32 = 5.0;

/// Edge length of one terrain block.
pub const BLOCK_SIZE: f32 = 100.0;
/// Offset from a block's base to its top face, in blocks.
pub const BLOCK_TOP_OFFSET: f32 = 1.0;

/// Default length of a match.
pub const MATCH_DURATION_SECS: u32 = 180;
/// Interval between match clock updates.
pub const MATCH_TICK_SECS: f32 = 1.0;

/// Lengths shorter than this are treated as zero.
pub const GEOMETRY_EPSILON: f32 = 1e-4;
