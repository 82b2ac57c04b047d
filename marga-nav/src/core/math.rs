//! Angle and distance utilities.
//!
//! All angles are in radians, counter-clockwise positive from the +X axis
//! (ROS REP-103).

use std::f64::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Wrap an angle into [0, 2π).
///
/// `atan2` and quaternion yaw both produce values in (-π, π]; the heading
/// comparison works on the positive range instead.
///
/// # Example
/// ```
/// use marga_nav::core::math::wrap_positive;
/// use std::f64::consts::PI;
///
/// assert!((wrap_positive(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
/// assert!((wrap_positive(PI / 4.0) - PI / 4.0).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap_positive(angle: f64) -> f64 {
    let a = angle.rem_euclid(TWO_PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if a >= TWO_PI { 0.0 } else { a }
}

/// Unsigned angular distance between two angles, folded into [0, π].
///
/// Both inputs are wrapped into [0, 2π) first, then the absolute
/// difference is folded so that the shorter way round is reported.
#[inline]
pub fn folded_difference(a: f64, b: f64) -> f64 {
    let angle = (wrap_positive(a) - wrap_positive(b)).abs();
    if angle > PI { TWO_PI - angle } else { angle }
}
