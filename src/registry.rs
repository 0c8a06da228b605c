//! Process-scoped coordinate context
//!
//! A [`CoordinateRegistry`] owns the configuration and one canonical cache per
//! representation. Build it once at startup and pass it (or an `Arc` of it)
//! to the code that creates coordinates; it is `Send + Sync` and needs no
//! teardown.

use std::sync::Arc;

use crate::cache::{component_key, CacheStats, CanonicalCache};
use crate::config::CoordinateConfig;
use crate::coordinates::{CartesianCoordinate, Coordinate, Position, SphericalCoordinate};
use crate::errors::Result;

/// A shared, canonical coordinate handed out by the registry
#[derive(Debug, Clone)]
pub enum SharedPosition {
    Cartesian(Arc<CartesianCoordinate>),
    Spherical(Arc<SphericalCoordinate>),
}

impl SharedPosition {
    /// Copies the value out of the shared instance
    pub fn position(&self) -> Position {
        match self {
            SharedPosition::Cartesian(c) => Position::Cartesian(**c),
            SharedPosition::Spherical(s) => Position::Spherical(**s),
        }
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(&self, other: &SharedPosition) -> bool {
        match (self, other) {
            (SharedPosition::Cartesian(a), SharedPosition::Cartesian(b)) => Arc::ptr_eq(a, b),
            (SharedPosition::Spherical(a), SharedPosition::Spherical(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Statistics for both caches of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Cache of Cartesian instances
    pub cartesian: CacheStats,
    /// Cache of spherical instances, keyed by canonical components
    pub spherical: CacheStats,
}

/// Configuration plus canonical instance caches
pub struct CoordinateRegistry {
    config: CoordinateConfig,
    cartesian: CanonicalCache<CartesianCoordinate>,
    spherical: CanonicalCache<SphericalCoordinate>,
}

impl CoordinateRegistry {
    /// Creates a registry with empty caches
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatial_coords::{CoordinateConfig, CoordinateRegistry};
    ///
    /// let registry = CoordinateRegistry::new(CoordinateConfig {
    ///     cache_enabled: false,
    ///     ..CoordinateConfig::default()
    /// });
    /// assert!(!registry.config().cache_enabled);
    /// ```
    pub fn new(config: CoordinateConfig) -> Self {
        Self {
            config,
            cartesian: CanonicalCache::new(),
            spherical: CanonicalCache::new(),
        }
    }

    /// The configuration the registry was built with
    pub fn config(&self) -> &CoordinateConfig {
        &self.config
    }

    /// Returns the canonical Cartesian instance for `(x, y, z)`
    ///
    /// With caching disabled, every call returns a fresh instance.
    pub fn cartesian(&self, x: f64, y: f64, z: f64) -> Result<Arc<CartesianCoordinate>> {
        if !self.config.cache_enabled {
            return CartesianCoordinate::new(x, y, z).map(Arc::new);
        }
        self.cartesian
            .get_or_try_insert_with(component_key(x, y, z), || CartesianCoordinate::new(x, y, z))
    }

    /// Returns the canonical spherical instance for `(phi, theta, radius)`
    ///
    /// Inputs are normalized before the lookup, so equivalent raw inputs
    /// (such as `phi` and `phi + 2π` when the sums round identically) share an
    /// instance.
    pub fn spherical(&self, phi: f64, theta: f64, radius: f64) -> Result<Arc<SphericalCoordinate>> {
        if !self.config.cache_enabled {
            return SphericalCoordinate::new(phi, theta, radius).map(Arc::new);
        }
        let (n_phi, n_theta, n_radius) =
            SphericalCoordinate::normalized_components(phi, theta, radius);
        self.spherical
            .get_or_try_insert_with(component_key(n_phi, n_theta, n_radius), || {
                SphericalCoordinate::new(phi, theta, radius)
            })
    }

    /// Returns the canonical instance for a position, keeping its representation
    pub fn position(&self, position: &Position) -> Result<SharedPosition> {
        match position {
            Position::Cartesian(c) => self
                .cartesian(c.x(), c.y(), c.z())
                .map(SharedPosition::Cartesian),
            Position::Spherical(s) => self
                .spherical(s.phi(), s.theta(), s.radius())
                .map(SharedPosition::Spherical),
        }
    }

    /// Approximate equality using the configured tolerance
    ///
    /// Errors from the underlying distance, other than overflow, propagate.
    pub fn approx_eq<A, B>(&self, a: &A, b: &B) -> Result<bool>
    where
        A: Coordinate,
        B: Coordinate + ?Sized,
    {
        a.is_within(b, self.config.tolerance)
    }

    /// Entry and construction counts for both caches
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            cartesian: self.cartesian.stats(),
            spherical: self.spherical.stats(),
        }
    }
}

impl Default for CoordinateRegistry {
    fn default() -> Self {
        Self::new(CoordinateConfig::default())
    }
}
