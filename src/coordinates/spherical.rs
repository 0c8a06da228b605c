//! # Spherical Coordinate Module
//!
//! Spherical representation of a position: azimuth `phi`, polar angle `theta`
//! (measured from the +Z axis) and `radius`, all angles in radians.
//!
//! ## Canonical Form
//!
//! Constructor inputs may be outside the canonical ranges. Construction always
//! normalizes, so every constructed value satisfies:
//!
//! - `radius >= 0`
//! - `0 <= phi < 2π`
//! - `0 <= theta <= π`
//!
//! Normalization proceeds in three steps:
//!
//! 1. A negative radius is flipped through the origin: the radius is negated,
//!    `π` is added to `phi` and `theta` becomes `π - theta`.
//! 2. `theta` is reduced into `[0, 2π)`; a value past the pole (`> π`) is
//!    reflected to `2π - theta` and `phi` is rotated by `π`.
//! 3. `phi` is reduced into `[0, 2π)`.
//!
//! The canonical ranges are re-checked after normalization. A failure there is
//! an internal bug and surfaces as [`CoordinateError::InvariantViolation`].
//!
//! ## Examples
//!
//! ```rust
//! use spatial_coords::coordinates::SphericalCoordinate;
//! use std::f64::consts::PI;
//!
//! let c = SphericalCoordinate::new(PI, PI / 4.0, -2.0).unwrap();
//! assert_eq!(c.radius(), 2.0);
//! assert!(c.phi().abs() < 1e-12);
//! assert!((c.theta() - 3.0 * PI / 4.0).abs() < 1e-12);
//! ```

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::angle::wrap_two_pi;
use super::guard::assert_valid_scalar;
use super::{CartesianCoordinate, Coordinate, Representation};
use crate::errors::{CoordinateError, Result};

/// Spherical coordinate in canonical form
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "SphericalComponents")]
pub struct SphericalCoordinate {
    /// Azimuth angle in radians, `[0, 2π)`
    phi: f64,
    /// Polar angle in radians, `[0, π]`
    theta: f64,
    /// Distance from the origin, `>= 0`
    radius: f64,
}

#[derive(Deserialize)]
struct SphericalComponents {
    phi: f64,
    theta: f64,
    radius: f64,
}

impl TryFrom<SphericalComponents> for SphericalCoordinate {
    type Error = CoordinateError;

    fn try_from(raw: SphericalComponents) -> Result<Self> {
        SphericalCoordinate::new(raw.phi, raw.theta, raw.radius)
    }
}

impl SphericalCoordinate {
    /// Creates a spherical coordinate, normalizing it into canonical form
    ///
    /// # Arguments
    ///
    /// * `phi` - Azimuth in radians, any finite value
    /// * `theta` - Polar angle in radians, any finite value
    /// * `radius` - Distance from the origin; a negative radius points through the origin
    ///
    /// # Errors
    ///
    /// - [`CoordinateError::InvalidValue`] if any input is NaN or infinite
    /// - [`CoordinateError::InvariantViolation`] if normalization failed to reach canonical form
    pub fn new(phi: f64, theta: f64, radius: f64) -> Result<Self> {
        let phi = assert_valid_scalar("phi", phi)?;
        let theta = assert_valid_scalar("theta", theta)?;
        let radius = assert_valid_scalar("radius", radius)?;

        let (phi, theta, radius) = Self::normalized_components(phi, theta, radius);
        let coord = SphericalCoordinate { phi, theta, radius };
        coord.check_invariants()?;
        Ok(coord)
    }

    /// Creates a spherical coordinate from angles in degrees
    pub fn from_degrees(phi_deg: f64, theta_deg: f64, radius: f64) -> Result<Self> {
        Self::new(phi_deg.to_radians(), theta_deg.to_radians(), radius)
    }

    /// Normalizes raw components into `(phi, theta, radius)` canonical form
    ///
    /// This is the same transformation [`SphericalCoordinate::new`] applies,
    /// without validation. Applying it to already canonical components returns
    /// them unchanged, so the result can serve as a cache key.
    pub fn normalized_components(phi: f64, theta: f64, radius: f64) -> (f64, f64, f64) {
        let (mut phi, mut theta, mut radius) = (phi, theta, radius);

        if radius < 0.0 {
            radius = -radius;
            phi += PI;
            theta = PI - theta;
        }

        theta = wrap_two_pi(theta);
        if theta > PI {
            theta = TAU - theta;
            phi += PI;
        }

        phi = wrap_two_pi(phi);

        // Collapses -0.0
        (phi, theta, radius.abs())
    }

    /// Azimuth in radians, within `[0, 2π)`
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Polar angle from the +z axis in radians, within `[0, π]`
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Distance from the origin, never negative
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Azimuth in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatial_coords::coordinates::SphericalCoordinate;
    ///
    /// let c = SphericalCoordinate::from_degrees(-90.0, 45.0, 1.0).unwrap();
    /// assert!((c.phi_degrees() - 270.0).abs() < 1e-9);
    /// ```
    pub fn phi_degrees(&self) -> f64 {
        self.phi.to_degrees()
    }

    /// Polar angle in degrees
    pub fn theta_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }

    /// Bit-exact comparison after converting `other` to spherical form
    ///
    /// Returns `false` when the other coordinate cannot be projected.
    pub fn exact_equals<C: Coordinate + ?Sized>(&self, other: &C) -> bool {
        match other.spherical_projection() {
            Ok(projected) => self.bits() == projected.bits(),
            Err(_) => false,
        }
    }

    pub(crate) fn bits(&self) -> [u64; 3] {
        [
            self.phi.to_bits(),
            self.theta.to_bits(),
            self.radius.to_bits(),
        ]
    }

    fn check_invariants(&self) -> Result<()> {
        let violation = if !(self.phi.is_finite() && self.theta.is_finite() && self.radius.is_finite()) {
            Some("components must be finite")
        } else if self.radius < 0.0 {
            Some("radius must not be negative")
        } else if !(0.0..TAU).contains(&self.phi) {
            Some("phi must be within [0, 2pi)")
        } else if !(0.0..=PI).contains(&self.theta) {
            Some("theta must be within [0, pi]")
        } else {
            None
        };

        match violation {
            None => Ok(()),
            Some(reason) => {
                log::error!(
                    "Spherical coordinate invariant violated after normalization: {} ({})",
                    reason,
                    self
                );
                Err(CoordinateError::InvariantViolation(format!(
                    "spherical coordinate: {}",
                    reason
                )))
            }
        }
    }
}

impl Coordinate for SphericalCoordinate {
    fn representation(&self) -> Representation {
        Representation::Spherical
    }

    fn cartesian_projection(&self) -> Result<CartesianCoordinate> {
        let sin_theta = self.theta.sin();
        CartesianCoordinate::new(
            self.radius * self.phi.cos() * sin_theta,
            self.radius * self.phi.sin() * sin_theta,
            self.radius * self.theta.cos(),
        )
    }

    fn spherical_projection(&self) -> Result<SphericalCoordinate> {
        Ok(*self)
    }
}

/// Bit-exact equality over the canonical `(phi, theta, radius)`
///
/// Two spherical values naming the same point can still differ, for example
/// on the polar axis where azimuth is arbitrary. For domain comparisons use
/// [`Coordinate::is_approximately_equal`].
impl PartialEq for SphericalCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for SphericalCoordinate {}

impl Hash for SphericalCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Display for SphericalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(phi: {}, theta: {}, radius: {})",
            self.phi, self.theta, self.radius
        )
    }
}
