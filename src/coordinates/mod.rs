//! # Coordinates
//!
//! A 3-D position with two interchangeable representations:
//!
//! - [`CartesianCoordinate`]: `(x, y, z)`
//! - [`SphericalCoordinate`]: `(phi, theta, radius)` in canonical form
//!
//! Both implement the [`Coordinate`] capability trait. The trait's provided
//! methods perform checked conversion and the derived metrics (Euclidean
//! distance, central angle, approximate equality), so a query can mix
//! representations freely. [`Position`] is the tagged union for callers that
//! hold either representation at runtime.
//!
//! ## Checked Conversion
//!
//! [`Coordinate::to_cartesian`] and [`Coordinate::to_spherical`] convert, then
//! convert the result back and compare it against the direct projection of
//! the source. A mismatch beyond [`EPSILON`] is reported as
//! [`CoordinateError::ConversionInconsistency`]. Comparison rules:
//!
//! - linear components compare relative to the magnitude of the point
//!   (`|a - b| <= ε·max(1, s)` with `s` the largest component magnitude of
//!   either point), so large coordinates are not rejected for ordinary rounding
//! - two radii both within `ε` of zero are equal regardless of angle
//! - azimuth compares by circular difference and is ignored on the polar
//!   axis, where it is undefined
//!
//! ## Examples
//!
//! ```rust
//! use spatial_coords::coordinates::{CartesianCoordinate, Coordinate, SphericalCoordinate};
//! use std::f64::consts::PI;
//!
//! let a = CartesianCoordinate::new(0.0, 1.0, 0.0).unwrap();
//! let b = SphericalCoordinate::new(PI / 2.0, PI / 2.0, 1.0).unwrap();
//! assert!(a.is_approximately_equal(&b).unwrap());
//!
//! let north = SphericalCoordinate::new(0.0, 0.0, 1.0).unwrap();
//! assert!((a.central_angle(&north).unwrap() - PI / 2.0).abs() < 1e-12);
//! ```

pub mod angle;
pub mod cartesian;
pub mod guard;
pub mod spherical;

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use cartesian::CartesianCoordinate;
pub use spherical::SphericalCoordinate;

use crate::errors::{CoordinateError, Result};
use angle::{angular_difference, is_on_polar_axis};
use guard::ensure_finite_result;

/// Tolerance for conversion checks and approximate equality
pub const EPSILON: f64 = 1e-6;

/// The two coordinate representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    Cartesian,
    Spherical,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Cartesian => write!(f, "cartesian"),
            Representation::Spherical => write!(f, "spherical"),
        }
    }
}

/// Capability shared by every coordinate representation
///
/// Implementors supply the raw, unchecked projections. Everything else is
/// provided and should not be overridden.
pub trait Coordinate {
    /// The representation the value is stored in
    fn representation(&self) -> Representation;

    /// Representation-specific conversion to Cartesian form, unchecked
    fn cartesian_projection(&self) -> Result<CartesianCoordinate>;

    /// Representation-specific conversion to spherical form, unchecked
    fn spherical_projection(&self) -> Result<SphericalCoordinate>;

    /// Converts to Cartesian form, verifying the conversion round-trips
    ///
    /// Identity for Cartesian values.
    fn to_cartesian(&self) -> Result<CartesianCoordinate> {
        let converted = self.cartesian_projection()?;
        if self.representation() == Representation::Cartesian {
            return Ok(converted);
        }

        let expected = self.spherical_projection()?;
        let round_trip = converted.spherical_projection()?;
        if spherical_close(&round_trip, &expected, EPSILON) {
            Ok(converted)
        } else {
            Err(inconsistency(
                self.representation(),
                Representation::Cartesian,
                &round_trip,
                &expected,
            ))
        }
    }

    /// Converts to spherical form, verifying the conversion round-trips
    ///
    /// Identity for spherical values.
    fn to_spherical(&self) -> Result<SphericalCoordinate> {
        let converted = self.spherical_projection()?;
        if self.representation() == Representation::Spherical {
            return Ok(converted);
        }

        let expected = self.cartesian_projection()?;
        let round_trip = converted.cartesian_projection()?;
        if cartesian_close(&round_trip, &expected, EPSILON) {
            Ok(converted)
        } else {
            Err(inconsistency(
                self.representation(),
                Representation::Spherical,
                &round_trip,
                &expected,
            ))
        }
    }

    /// Euclidean distance to another coordinate
    ///
    /// # Errors
    ///
    /// - [`CoordinateError::ArithmeticOverflow`] if the sum of squared
    ///   differences exceeds `f64::MAX`
    /// - any error from converting either operand with [`Coordinate::to_cartesian`]
    fn distance<C: Coordinate + ?Sized>(&self, other: &C) -> Result<f64>
    where
        Self: Sized,
    {
        let a = self.to_cartesian()?;
        let b = other.to_cartesian()?;

        let radicand =
            ensure_finite_result("distance", (a.to_vector3() - b.to_vector3()).norm_squared())?;
        let distance = radicand.sqrt();

        if distance < 0.0 {
            log::error!("Computed negative distance {} between {} and {}", distance, a, b);
            return Err(CoordinateError::InvariantViolation(format!(
                "distance must not be negative, got {}",
                distance
            )));
        }
        Ok(distance)
    }

    /// Angle between the directions of two coordinates as seen from the origin
    ///
    /// Returns radians in `[0, π]`.
    ///
    /// # Errors
    ///
    /// [`CoordinateError::DegenerateInput`] if either coordinate is the origin.
    fn central_angle<C: Coordinate + ?Sized>(&self, other: &C) -> Result<f64>
    where
        Self: Sized,
    {
        let a = self.to_spherical()?;
        let b = other.to_spherical()?;

        if a.radius() == 0.0 || b.radius() == 0.0 {
            log::warn!("Central angle requested with the origin as an operand");
            return Err(CoordinateError::DegenerateInput(
                "central angle is undefined for the origin".to_string(),
            ));
        }

        let phi_diff = (a.phi() - b.phi()).abs();
        let cos_angle = a.theta().cos() * b.theta().cos()
            + a.theta().sin() * b.theta().sin() * phi_diff.cos();

        // Handle numerical precision issues
        let angle = cos_angle.clamp(-1.0, 1.0).acos();

        if !(0.0..=PI).contains(&angle) {
            log::error!("Central angle {} between {} and {} out of range", angle, a, b);
            return Err(CoordinateError::InvariantViolation(format!(
                "central angle must be within [0, pi], got {}",
                angle
            )));
        }
        Ok(angle)
    }

    /// Whether the Euclidean distance to `other` is at most `tolerance`
    ///
    /// Points whose distance overflows `f64` are not within any finite
    /// tolerance, so [`CoordinateError::ArithmeticOverflow`] yields `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Any other error from [`Coordinate::distance`], such as a failed
    /// conversion self-check.
    fn is_within<C: Coordinate + ?Sized>(&self, other: &C, tolerance: f64) -> Result<bool>
    where
        Self: Sized,
    {
        match self.distance(other) {
            Ok(distance) => Ok(distance <= tolerance),
            Err(CoordinateError::ArithmeticOverflow { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Representation-independent equality within [`EPSILON`]
    ///
    /// This is the domain equality. `==` on the concrete types compares bit
    /// patterns and is only meant for caching.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatial_coords::{CartesianCoordinate, Coordinate, SphericalCoordinate};
    ///
    /// let c = CartesianCoordinate::new(0.0, 0.0, 2.0).unwrap();
    /// let s = SphericalCoordinate::new(0.0, 0.0, 2.0).unwrap();
    /// assert!(c.is_approximately_equal(&s).unwrap());
    /// ```
    fn is_approximately_equal<C: Coordinate + ?Sized>(&self, other: &C) -> Result<bool>
    where
        Self: Sized,
    {
        self.is_within(other, EPSILON)
    }
}

fn within_scaled(a: f64, b: f64, tolerance: f64, scale: f64) -> bool {
    (a - b).abs() <= tolerance * scale.max(1.0)
}

fn cartesian_close(a: &CartesianCoordinate, b: &CartesianCoordinate, tolerance: f64) -> bool {
    let scale = [a.x(), a.y(), a.z(), b.x(), b.y(), b.z()]
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));

    within_scaled(a.x(), b.x(), tolerance, scale)
        && within_scaled(a.y(), b.y(), tolerance, scale)
        && within_scaled(a.z(), b.z(), tolerance, scale)
}

fn spherical_close(a: &SphericalCoordinate, b: &SphericalCoordinate, tolerance: f64) -> bool {
    if a.radius() <= tolerance && b.radius() <= tolerance {
        return true;
    }

    let scale = a.radius().max(b.radius());
    if !within_scaled(a.radius(), b.radius(), tolerance, scale) {
        return false;
    }
    if (a.theta() - b.theta()).abs() > tolerance {
        return false;
    }
    if is_on_polar_axis(a.theta(), tolerance) || is_on_polar_axis(b.theta(), tolerance) {
        return true;
    }
    angular_difference(a.phi(), b.phi()) <= tolerance
}

fn inconsistency(
    from: Representation,
    to: Representation,
    round_trip: &dyn fmt::Display,
    expected: &dyn fmt::Display,
) -> CoordinateError {
    log::error!(
        "Conversion from {} to {} failed its round-trip check: got {}, expected {}",
        from,
        to,
        round_trip,
        expected
    );
    CoordinateError::ConversionInconsistency { from, to }
}

/// A coordinate held in either representation
///
/// `==` is bit-exact and representation-sensitive: a Cartesian and a
/// spherical position for the same point are never `==`. Use
/// [`Coordinate::is_approximately_equal`] to compare points.
///
/// Serializes with an internal `representation` tag:
///
/// ```rust
/// use spatial_coords::coordinates::Position;
///
/// let p: Position = serde_json::from_str(
///     r#"{"representation": "cartesian", "x": 1.0, "y": 0.0, "z": 0.0}"#,
/// ).unwrap();
/// assert_eq!(p, Position::cartesian(1.0, 0.0, 0.0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "representation", rename_all = "snake_case")]
pub enum Position {
    Cartesian(CartesianCoordinate),
    Spherical(SphericalCoordinate),
}

impl Position {
    /// Creates a position stored in Cartesian form
    pub fn cartesian(x: f64, y: f64, z: f64) -> Result<Self> {
        CartesianCoordinate::new(x, y, z).map(Position::Cartesian)
    }

    /// Creates a position stored in (normalized) spherical form
    pub fn spherical(phi: f64, theta: f64, radius: f64) -> Result<Self> {
        SphericalCoordinate::new(phi, theta, radius).map(Position::Spherical)
    }

    /// Re-expresses the position in the requested representation
    pub fn convert_to(&self, representation: Representation) -> Result<Position> {
        match representation {
            Representation::Cartesian => self.to_cartesian().map(Position::Cartesian),
            Representation::Spherical => self.to_spherical().map(Position::Spherical),
        }
    }
}

impl Coordinate for Position {
    fn representation(&self) -> Representation {
        match self {
            Position::Cartesian(c) => c.representation(),
            Position::Spherical(s) => s.representation(),
        }
    }

    fn cartesian_projection(&self) -> Result<CartesianCoordinate> {
        match self {
            Position::Cartesian(c) => c.cartesian_projection(),
            Position::Spherical(s) => s.cartesian_projection(),
        }
    }

    fn spherical_projection(&self) -> Result<SphericalCoordinate> {
        match self {
            Position::Cartesian(c) => c.spherical_projection(),
            Position::Spherical(s) => s.spherical_projection(),
        }
    }
}

impl From<CartesianCoordinate> for Position {
    fn from(c: CartesianCoordinate) -> Self {
        Position::Cartesian(c)
    }
}

impl From<SphericalCoordinate> for Position {
    fn from(s: SphericalCoordinate) -> Self {
        Position::Spherical(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Cartesian(c) => write!(f, "cartesian {}", c),
            Position::Spherical(s) => write!(f, "spherical {}", s),
        }
    }
}
