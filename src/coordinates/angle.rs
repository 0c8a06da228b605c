//! # Angle Helpers
//!
//! Range reduction and comparison for the angular components of spherical
//! coordinates. All angles are in radians.
//!
//! ## Range Reduction
//!
//! Reduction into `[0, 2π)` uses the Euclidean remainder rather than repeated
//! addition of `2π`, so it runs in constant time even for very large inputs.
//! `f64::rem_euclid` can round a tiny negative input up to exactly `2π`; that
//! case is folded back to `0` so the half-open range always holds. Negative
//! zero comes out as positive zero.
//!
//! ## Examples
//!
//! ```rust
//! use spatial_coords::coordinates::angle::{wrap_two_pi, angular_difference};
//! use std::f64::consts::PI;
//!
//! assert!((wrap_two_pi(5.0 * PI) - PI).abs() < 1e-12);
//! assert!(angular_difference(0.1, 2.0 * PI - 0.1) < 0.2 + 1e-12);
//! ```

use std::f64::consts::{PI, TAU};

/// Reduces an angle into `[0, 2π)`
pub fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        // -0.0 + 0.0 is +0.0
        wrapped + 0.0
    }
}

/// Smallest absolute difference between two angles, in `[0, π]`
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = wrap_two_pi(a - b);
    if diff > PI {
        TAU - diff
    } else {
        diff
    }
}

/// Whether a polar angle lies on the polar axis, where azimuth is undefined
pub fn is_on_polar_axis(theta: f64, tolerance: f64) -> bool {
    theta.abs() <= tolerance || (PI - theta).abs() <= tolerance
}
