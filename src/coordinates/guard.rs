//! Finiteness checks shared by all coordinate constructors

use crate::errors::{CoordinateError, Result};

/// Rejects NaN and infinite scalars
///
/// Returns the value unchanged when it is finite, so constructors can
/// validate and bind in one step.
///
/// # Examples
///
/// ```rust
/// use spatial_coords::coordinates::guard::assert_valid_scalar;
///
/// assert_eq!(assert_valid_scalar("x", 1.5).unwrap(), 1.5);
/// assert!(assert_valid_scalar("x", f64::NAN).is_err());
/// ```
pub fn assert_valid_scalar(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        log::warn!("Rejected non-finite value for {}: {}", name, value);
        Err(CoordinateError::InvalidValue { name, value })
    }
}

/// Checks an intermediate result for overflow
///
/// Used where a sum of squares is about to go into a square root.
pub fn ensure_finite_result(operation: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        log::warn!("Intermediate result of {} overflowed: {}", operation, value);
        Err(CoordinateError::ArithmeticOverflow { operation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_values_pass_through() {
        for value in [0.0, -0.0, 1.0, -1e300, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(assert_valid_scalar("value", value).unwrap(), value);
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match assert_valid_scalar("radius", value) {
                Err(CoordinateError::InvalidValue { name, .. }) => assert_eq!(name, "radius"),
                other => panic!("expected InvalidValue, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_overflow_detection() {
        let radicand = f64::MAX * 2.0;
        assert_eq!(
            ensure_finite_result("distance", radicand),
            Err(CoordinateError::ArithmeticOverflow { operation: "distance" })
        );
        assert_eq!(ensure_finite_result("distance", 4.0), Ok(4.0));
    }
}
