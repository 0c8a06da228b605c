//! spatial-coords: 3-D coordinates in Cartesian and spherical form
//!
//! This crate provides an immutable position value with two interchangeable
//! representations, checked conversion between them, Euclidean distance,
//! central angle and tolerance-based equality. A registry can hand out
//! canonical shared instances so that equal values are also identical.
//!
//! ```rust
//! use spatial_coords::{CartesianCoordinate, Coordinate, CoordinateRegistry};
//!
//! let registry = CoordinateRegistry::default();
//! let a = registry.cartesian(0.0, 0.0, 0.0).unwrap();
//! let b = registry.spherical(0.0, 0.0, 1.0).unwrap();
//!
//! assert_eq!(a.distance(&*b).unwrap(), 1.0);
//! assert!(b
//!     .is_approximately_equal(&CartesianCoordinate::new(0.0, 0.0, 1.0).unwrap())
//!     .unwrap());
//! ```

pub mod cache;
pub mod config;
pub mod coordinates;
pub mod errors;
pub mod registry;

// Re-export commonly used types
pub use config::{ConfigError, CoordinateConfig};
pub use coordinates::{
    CartesianCoordinate, Coordinate, Position, Representation, SphericalCoordinate, EPSILON,
};
pub use errors::{CoordinateError, Result};
pub use registry::{CoordinateRegistry, SharedPosition};
