//! # Cartesian Coordinate Module
//!
//! This module provides the 3D Cartesian representation of a position. It is
//! the representation used for distance computations and the reference form
//! that spherical values are checked against.
//!
//! ## Invariants
//!
//! - Each component is a finite `f64` (no NaN, no infinity)
//! - Values are immutable once constructed; fields are private and exposed
//!   through accessors only
//! - Any finite triple is a valid point, so no normalization takes place
//!
//! ## Equality
//!
//! `PartialEq`, `Eq` and `Hash` compare the raw bit patterns of the components.
//! This is the relation used for canonical instance caching. Use
//! [`Coordinate::is_approximately_equal`] for domain comparisons, which also
//! works across representations.
//!
//! ## Examples
//!
//! ```rust
//! use spatial_coords::coordinates::{CartesianCoordinate, Coordinate};
//!
//! let origin = CartesianCoordinate::origin();
//! let point = CartesianCoordinate::new(3.0, 4.0, 0.0).unwrap();
//! assert_eq!(origin.distance(&point).unwrap(), 5.0);
//! ```

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::hash::{Hash, Hasher};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::guard::{assert_valid_scalar, ensure_finite_result};
use super::{Coordinate, Representation, SphericalCoordinate};
use crate::errors::{CoordinateError, Result};

/// Three-dimensional Cartesian coordinate
///
/// # Storage Strategy
///
/// - Each component stored as `f64` exactly as provided
/// - Finiteness checked once, at construction
/// - Compatible with nalgebra `Vector3` for linear algebra operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "CartesianComponents")]
pub struct CartesianCoordinate {
    x: f64,
    y: f64,
    z: f64,
}

/// Unvalidated wire form, checked through [`CartesianCoordinate::new`]
#[derive(Deserialize)]
struct CartesianComponents {
    x: f64,
    y: f64,
    z: f64,
}

impl TryFrom<CartesianComponents> for CartesianCoordinate {
    type Error = CoordinateError;

    fn try_from(raw: CartesianComponents) -> Result<Self> {
        CartesianCoordinate::new(raw.x, raw.y, raw.z)
    }
}

impl CartesianCoordinate {
    /// Creates a new Cartesian coordinate
    ///
    /// # Errors
    ///
    /// [`CoordinateError::InvalidValue`] if any component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatial_coords::coordinates::CartesianCoordinate;
    ///
    /// let coord = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
    /// assert_eq!(coord.x(), 1.0);
    /// assert!(CartesianCoordinate::new(0.0, 0.0, f64::NAN).is_err());
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        Ok(CartesianCoordinate {
            x: assert_valid_scalar("x", x)?,
            y: assert_valid_scalar("y", y)?,
            z: assert_valid_scalar("z", z)?,
        })
    }

    /// The origin `(0, 0, 0)`
    pub fn origin() -> Self {
        CartesianCoordinate {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// X component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Euclidean distance from the origin
    ///
    /// Computed with `hypot`, so only a norm that is itself beyond `f64::MAX`
    /// overflows.
    ///
    /// # Errors
    ///
    /// [`CoordinateError::ArithmeticOverflow`] if the norm is not representable.
    pub fn magnitude(&self) -> Result<f64> {
        ensure_finite_result("magnitude", self.x.hypot(self.y).hypot(self.z))
    }

    /// Bit-exact comparison against another coordinate's Cartesian projection
    ///
    /// Returns `false` when the other coordinate cannot be projected.
    pub fn exact_equals<C: Coordinate + ?Sized>(&self, other: &C) -> bool {
        match other.cartesian_projection() {
            Ok(projected) => self.bits() == projected.bits(),
            Err(_) => false,
        }
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatial_coords::coordinates::CartesianCoordinate;
    ///
    /// let coord = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
    /// let vec = coord.to_vector3();
    /// assert_eq!(vec.y, 2.0);
    /// ```
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub(crate) fn bits(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl TryFrom<Vector3<f64>> for CartesianCoordinate {
    type Error = CoordinateError;

    fn try_from(vec: Vector3<f64>) -> Result<Self> {
        CartesianCoordinate::new(vec.x, vec.y, vec.z)
    }
}

impl Coordinate for CartesianCoordinate {
    fn representation(&self) -> Representation {
        Representation::Cartesian
    }

    fn cartesian_projection(&self) -> Result<CartesianCoordinate> {
        Ok(*self)
    }

    /// Azimuth follows the quadrant-aware rule: `atan2(y, x)` whenever `x` is
    /// non-zero, otherwise `±π/2` by the sign of `y` (the origin gets `-π/2`).
    fn spherical_projection(&self) -> Result<SphericalCoordinate> {
        let radius = self.magnitude()?;

        let phi = if self.x == 0.0 {
            if self.y > 0.0 {
                FRAC_PI_2
            } else {
                -FRAC_PI_2
            }
        } else {
            self.y.atan2(self.x)
        };

        let theta = if radius == 0.0 {
            0.0
        } else {
            // Rounding can push the ratio a hair outside acos' domain
            (self.z / radius).clamp(-1.0, 1.0).acos()
        };

        SphericalCoordinate::new(phi, theta, radius)
    }
}

/// Bit-exact equality over `(x, y, z)`, the relation used for cache keys
///
/// `0.0` and `-0.0` differ. For domain comparisons use
/// [`Coordinate::is_approximately_equal`].
impl PartialEq for CartesianCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for CartesianCoordinate {}

impl Hash for CartesianCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Display for CartesianCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {}, y: {}, z: {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::f64::consts::PI;

    #[test]
    fn test_cartesian_creation() {
        let coord = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
        assert_eq!(coord.x(), 1.0);
        assert_eq!(coord.y(), 2.0);
        assert_eq!(coord.z(), 3.0);
    }

    #[test]
    fn test_invalid_components_rejected() {
        assert!(matches!(
            CartesianCoordinate::new(0.0, 0.0, f64::NAN),
            Err(CoordinateError::InvalidValue { name: "z", .. })
        ));
        assert!(matches!(
            CartesianCoordinate::new(f64::INFINITY, 0.0, 0.0),
            Err(CoordinateError::InvalidValue { name: "x", .. })
        ));
        assert!(matches!(
            CartesianCoordinate::new(0.0, f64::NEG_INFINITY, 0.0),
            Err(CoordinateError::InvalidValue { name: "y", .. })
        ));
    }

    #[test]
    fn test_magnitude_calculation() {
        let coord = CartesianCoordinate::new(3.0, 4.0, 0.0).unwrap();
        assert_eq!(coord.magnitude().unwrap(), 5.0);
        assert_eq!(CartesianCoordinate::origin().magnitude().unwrap(), 0.0);

        let large = CartesianCoordinate::new(f64::MAX, 0.0, 0.0).unwrap();
        assert_eq!(large.magnitude().unwrap(), f64::MAX);

        let huge = CartesianCoordinate::new(f64::MAX, f64::MAX, 0.0).unwrap();
        assert!(matches!(
            huge.magnitude(),
            Err(CoordinateError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_spherical_projection_of_axes() {
        let x_axis = CartesianCoordinate::new(1.0, 0.0, 0.0).unwrap();
        let s = x_axis.spherical_projection().unwrap();
        assert!((s.phi() - 0.0).abs() < 1e-15);
        assert!((s.theta() - PI / 2.0).abs() < 1e-15);
        assert!((s.radius() - 1.0).abs() < 1e-15);

        let y_axis = CartesianCoordinate::new(0.0, 2.0, 0.0).unwrap();
        let s = y_axis.spherical_projection().unwrap();
        assert!((s.phi() - PI / 2.0).abs() < 1e-15);
        assert!((s.radius() - 2.0).abs() < 1e-15);

        let neg_y_axis = CartesianCoordinate::new(0.0, -2.0, 0.0).unwrap();
        let s = neg_y_axis.spherical_projection().unwrap();
        assert!((s.phi() - 3.0 * PI / 2.0).abs() < 1e-15);

        let z_axis = CartesianCoordinate::new(0.0, 0.0, -3.0).unwrap();
        let s = z_axis.spherical_projection().unwrap();
        assert!((s.theta() - PI).abs() < 1e-15);
        assert!((s.radius() - 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_spherical_projection_negative_x_quadrants() {
        let second = CartesianCoordinate::new(-1.0, 1.0, 0.0).unwrap();
        let s = second.spherical_projection().unwrap();
        assert!((s.phi() - 3.0 * PI / 4.0).abs() < 1e-15);

        let third = CartesianCoordinate::new(-1.0, -1.0, 0.0).unwrap();
        let s = third.spherical_projection().unwrap();
        assert!((s.phi() - 5.0 * PI / 4.0).abs() < 1e-15);

        let neg_x_axis = CartesianCoordinate::new(-1.0, 0.0, 0.0).unwrap();
        let s = neg_x_axis.spherical_projection().unwrap();
        assert!((s.phi() - PI).abs() < 1e-15);
    }

    #[test]
    fn test_zero_vector_projection() {
        let s = CartesianCoordinate::origin().spherical_projection().unwrap();
        assert_eq!(s.radius(), 0.0);
        assert_eq!(s.theta(), 0.0);
        assert!((s.phi() - 3.0 * PI / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_exact_equals() {
        let a = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
        let b = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
        let c = CartesianCoordinate::new(1.0, 2.0, 3.0 + 1e-12).unwrap();
        assert!(a.exact_equals(&b));
        assert!(!a.exact_equals(&c));
        assert!(a.is_approximately_equal(&c).unwrap());
    }

    #[test]
    fn test_hash_follows_bit_equality() {
        let mut set = HashSet::new();
        set.insert(CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap());
        set.insert(CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap());
        assert_eq!(set.len(), 1);

        // Signed zeros are distinct bit patterns
        set.insert(CartesianCoordinate::new(-0.0, 0.0, 0.0).unwrap());
        set.insert(CartesianCoordinate::origin());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_vector3_conversions() {
        let coord = CartesianCoordinate::new(1.0, 2.0, 3.0).unwrap();
        let vec = coord.to_vector3();
        assert_eq!(vec.x, 1.0);
        assert_eq!(vec.y, 2.0);
        assert_eq!(vec.z, 3.0);

        let coord_back = CartesianCoordinate::try_from(vec).unwrap();
        assert_eq!(coord, coord_back);

        assert!(CartesianCoordinate::try_from(Vector3::new(f64::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let coord: CartesianCoordinate =
            serde_json::from_str(r#"{"x": 1.0, "y": -2.5, "z": 0.0}"#).unwrap();
        assert_eq!(coord, CartesianCoordinate::new(1.0, -2.5, 0.0).unwrap());

        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":-2.5,"z":0.0}"#);

        // 1e999 parses to infinity and must be rejected by the constructor
        assert!(serde_json::from_str::<CartesianCoordinate>(r#"{"x": 1e999, "y": 0, "z": 0}"#).is_err());
    }

    #[test]
    fn test_display() {
        let coord = CartesianCoordinate::new(1.5, -2.0, 0.0).unwrap();
        assert_eq!(coord.to_string(), "(x: 1.5, y: -2, z: 0)");
    }
}
