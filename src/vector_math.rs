//! Vector helpers for slope sampling and wall bounces.
//! Small, allocation-free functions over `glam` types.
use glam::Vec3;

use crate::GEOMETRY_EPSILON;

/// Returns the unit vector of `vector`, or `None` when it is zero or not finite.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use skatepark::vector_math::safe_normalize;
/// let n = safe_normalize(Vec3::new(3.0, 0.0, 4.0)).unwrap();
/// assert!((n.x - 0.6).abs() < 1e-6);
/// assert!(safe_normalize(Vec3::ZERO).is_none());
/// assert!(safe_normalize(Vec3::new(f32::NAN, 1.0, 0.0)).is_none());
/// ```
#[must_use]
pub fn safe_normalize(vector: Vec3) -> Option<Vec3> {
    if !vector.is_finite() {
        return None;
    }
    vector.try_normalize()
}

/// Mirrors `direction` about the plane with the given `normal`.
///
/// A degenerate normal leaves the direction unchanged.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use skatepark::vector_math::reflect;
/// let bounced = reflect(Vec3::X, Vec3::NEG_X);
/// assert!((bounced - Vec3::NEG_X).length() < 1e-6);
/// ```
#[must_use]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    safe_normalize(normal).map_or(direction, |n| direction - 2.0 * direction.dot(n) * n)
}

/// Yaw in degrees of the horizontal part of `direction`.
///
/// Returns `None` for vertical or zero vectors, which carry no heading.
#[must_use]
pub fn yaw_degrees(direction: Vec3) -> Option<f32> {
    let flat = direction.truncate();
    if !flat.is_finite() || flat.length() <= GEOMETRY_EPSILON {
        return None;
    }
    Some(flat.y.atan2(flat.x).to_degrees())
}

/// Slope between two terrain hits expressed as the sine of the incline.
///
/// The rise from `behind` to `ahead` is divided by the straight-line distance
/// between the hits. Points without horizontal separation yield flat ground.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use skatepark::vector_math::slope_between;
/// let ahead = Vec3::new(40.0, 0.0, 30.0);
/// assert!((slope_between(ahead, Vec3::ZERO) - 0.6).abs() < 1e-6);
/// assert_eq!(slope_between(Vec3::Z, Vec3::ZERO), 0.0);
/// ```
#[must_use]
pub fn slope_between(ahead: Vec3, behind: Vec3) -> f32 {
    let span = ahead - behind;
    if !span.is_finite() || span.truncate().length() <= GEOMETRY_EPSILON {
        return 0.0;
    }
    span.z / span.length()
}

/// Pitch in degrees matching a slope sine, limited to `±max_angle`.
#[must_use]
pub fn pitch_from_slope(slope: f32, max_angle: f32) -> f32 {
    slope
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
        .clamp(-max_angle, max_angle)
}

/// Wraps an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
