//! Boundary validation for user-entered quantities
//!
//! Values are checked once, where they enter the engine. The compute
//! functions trust their input and never re-validate.

use crate::constants::{QuantityLimits, RECIPE};
use serde::Serialize;
use thiserror::Error;

/// Why a quantity was rejected
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    /// Not parseable as a number, or NaN
    #[error("Value must be a number")]
    NotANumber,

    #[error("Value must be at least {minimum}")]
    BelowMinimum { value: f64, minimum: f64 },

    #[error("Value cannot exceed {maximum}")]
    AboveMaximum { value: f64, maximum: f64 },
}

/// Pass/fail outcome with an optional reason
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<ValidationError>,
}

impl ValidationResult {
    pub const fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub const fn failed(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
        }
    }

    /// Human-readable reason, `None` when valid
    pub fn reason(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl From<Result<f64, ValidationError>> for ValidationResult {
    fn from(result: Result<f64, ValidationError>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(error) => Self::failed(error),
        }
    }
}

/// Check a value against explicit limits (bounds inclusive)
pub fn check_quantity_within(value: f64, limits: &QuantityLimits) -> Result<f64, ValidationError> {
    if value.is_nan() {
        return Err(ValidationError::NotANumber);
    }
    if value < limits.min_value {
        return Err(ValidationError::BelowMinimum {
            value,
            minimum: limits.min_value,
        });
    }
    if value > limits.max_value {
        return Err(ValidationError::AboveMaximum {
            value,
            maximum: limits.max_value,
        });
    }
    Ok(value)
}

/// Check a value against the standard limits, returning it on success
pub fn check_quantity(value: f64) -> Result<f64, ValidationError> {
    check_quantity_within(value, &RECIPE.limits)
}

/// Validate a value against the standard limits (0 to 10000 inclusive)
pub fn validate_quantity(value: f64) -> ValidationResult {
    check_quantity(value).into()
}

/// Parse raw field text without range checks. Empty or unparsable text is
/// [`ValidationError::NotANumber`].
pub fn parse_number(input: &str) -> Result<f64, ValidationError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber)
}

/// Parse raw field text and validate it against the standard limits
pub fn parse_quantity(input: &str) -> Result<f64, ValidationError> {
    check_quantity(parse_number(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_numbers() {
        assert!(validate_quantity(10.0).is_valid);
        assert!(validate_quantity(100.5).is_valid);
        assert_eq!(validate_quantity(10.0).reason(), None);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(validate_quantity(0.0).is_valid);
        assert!(validate_quantity(10000.0).is_valid);
    }

    #[test]
    fn test_rejects_nan() {
        let result = validate_quantity(f64::NAN);
        assert!(!result.is_valid);
        assert_eq!(result.error, Some(ValidationError::NotANumber));
        assert!(result.reason().unwrap().contains("number"));
    }

    #[test]
    fn test_rejects_negative() {
        let result = validate_quantity(-1.0);
        assert_eq!(
            result.error,
            Some(ValidationError::BelowMinimum {
                value: -1.0,
                minimum: 0.0
            })
        );
        assert_eq!(result.reason().unwrap(), "Value must be at least 0");
    }

    #[test]
    fn test_rejects_above_maximum() {
        let result = validate_quantity(10001.0);
        assert!(matches!(
            result.error,
            Some(ValidationError::AboveMaximum { .. })
        ));
        assert_eq!(result.reason().unwrap(), "Value cannot exceed 10000");
        assert!(!validate_quantity(f64::INFINITY).is_valid);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(validate_quantity(5.0).into_result(), Ok(()));
        assert_eq!(
            validate_quantity(f64::NAN).into_result(),
            Err(ValidationError::NotANumber)
        );
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 8 "), Ok(8.0));
        assert_eq!(parse_quantity("3.60"), Ok(3.6));
        assert_eq!(parse_quantity(""), Err(ValidationError::NotANumber));
        assert_eq!(parse_quantity("eight"), Err(ValidationError::NotANumber));
        assert_eq!(parse_quantity("NaN"), Err(ValidationError::NotANumber));
        assert!(matches!(
            parse_quantity("-2"),
            Err(ValidationError::BelowMinimum { .. })
        ));
    }

    #[test]
    fn test_parse_number_skips_range() {
        assert_eq!(parse_number("-4.5"), Ok(-4.5));
        assert_eq!(parse_number("1e5"), Ok(100000.0));
        assert_eq!(parse_number("  "), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_custom_limits() {
        let limits = QuantityLimits {
            max_value: 50.0,
            ..RECIPE.limits
        };
        assert_eq!(check_quantity_within(50.0, &limits), Ok(50.0));
        assert!(check_quantity_within(50.5, &limits).is_err());
    }
}
