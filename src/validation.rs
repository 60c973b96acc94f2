// Validation utilities module
// Custom `validator` functions for monetary and weight fields

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that an amount is strictly positive
pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        Err(ValidationError::new("must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that an amount is zero or positive
pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(ValidationError::new("must_not_be_negative"))
    } else {
        Ok(())
    }
}
