//! Error types for coordinate construction, conversion and queries

use crate::coordinates::Representation;
use thiserror::Error;

/// Main error type for coordinate operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// A constructor received a NaN or infinite component
    #[error("Invalid value for {name}: {value} (must be finite)")]
    InvalidValue {
        /// Name of the offending component
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A post-construction or post-computation invariant did not hold
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// Converting to the target representation and back disagreed with the direct conversion
    #[error("Conversion from {from} to {to} is inconsistent")]
    ConversionInconsistency {
        /// Representation of the value being converted
        from: Representation,
        /// Requested representation
        to: Representation,
    },

    /// An intermediate result exceeded the range of `f64`
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// The computation that overflowed
        operation: &'static str,
    },

    /// The operation is undefined for the given operands
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
}

impl CoordinateError {
    /// Whether the error was caused by the caller's input rather than an internal bug
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            CoordinateError::InvalidValue { .. }
                | CoordinateError::ArithmeticOverflow { .. }
                | CoordinateError::DegenerateInput(_)
        )
    }
}

/// Result type for coordinate operations
pub type Result<T> = std::result::Result<T, CoordinateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoordinateError::InvalidValue {
            name: "x",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Invalid value for x: NaN (must be finite)");

        let err = CoordinateError::ConversionInconsistency {
            from: Representation::Spherical,
            to: Representation::Cartesian,
        };
        assert_eq!(
            err.to_string(),
            "Conversion from spherical to cartesian is inconsistent"
        );
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(CoordinateError::ArithmeticOverflow { operation: "distance" }.is_caller_error());
        assert!(CoordinateError::DegenerateInput("origin".into()).is_caller_error());
        assert!(!CoordinateError::InvariantViolation("phi".into()).is_caller_error());
        assert!(!CoordinateError::ConversionInconsistency {
            from: Representation::Cartesian,
            to: Representation::Spherical,
        }
        .is_caller_error());
    }
}
