//! Boundary validation for user-supplied fields.
//!
//! The balance engine trusts its inputs; these rules run before anything is
//! persisted.

use evenshare_shared::AppError;
use evenshare_shared::types::Cents;
use rust_decimal::Decimal;
use thiserror::Error;

/// Maximum length of a group name, in characters.
pub const MAX_GROUP_NAME_LEN: usize = 100;
/// Maximum length of a member name, in characters.
pub const MAX_MEMBER_NAME_LEN: usize = 80;
/// Maximum length of an expense description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 140;
/// Largest accepted expense amount, in cents (`i32::MAX`).
pub const MAX_AMOUNT_CENTS: i64 = 2_147_483_647;

/// Validation errors for incoming fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is missing or blank.
    #[error("The {field} field is required")]
    Required {
        /// Field name.
        field: &'static str,
    },

    /// Field exceeds its maximum length.
    #[error("The {field} field may not be greater than {max} characters")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Maximum allowed characters.
        max: usize,
    },

    /// Amount is below one cent.
    #[error("The amount must be at least 0.01")]
    AmountTooSmall,

    /// Amount exceeds `MAX_AMOUNT_CENTS`.
    #[error("The amount may not be greater than 21474836.47")]
    AmountTooLarge,
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

fn required_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Validates a group name and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than `MAX_GROUP_NAME_LEN`.
pub fn validate_group_name(name: &str) -> Result<String, ValidationError> {
    required_text(name, "name", MAX_GROUP_NAME_LEN)
}

/// Validates a member name and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than `MAX_MEMBER_NAME_LEN`.
pub fn validate_member_name(name: &str) -> Result<String, ValidationError> {
    required_text(name, "name", MAX_MEMBER_NAME_LEN)
}

/// Validates an expense description and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the description is blank or longer than `MAX_DESCRIPTION_LEN`.
pub fn validate_description(description: &str) -> Result<String, ValidationError> {
    required_text(description, "description", MAX_DESCRIPTION_LEN)
}

/// Validates a major-unit amount and converts it to cents.
///
/// The amount must be at least `0.01`. Extra decimals are rounded half away
/// from zero, so `12.345` becomes `1235` cents.
///
/// # Errors
///
/// Returns `AmountTooSmall` below one cent and `AmountTooLarge` above
/// `MAX_AMOUNT_CENTS`.
pub fn validate_amount(amount: Decimal) -> Result<Cents, ValidationError> {
    if amount < Decimal::new(1, 2) {
        return Err(ValidationError::AmountTooSmall);
    }
    match Cents::from_major(amount) {
        Some(cents) if cents.get() <= MAX_AMOUNT_CENTS => Ok(cents),
        _ => Err(ValidationError::AmountTooLarge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_name_is_trimmed() {
        assert_eq!(validate_group_name("  Kyoto Trip ").unwrap(), "Kyoto Trip");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_names_are_required(#[case] name: &str) {
        assert_eq!(
            validate_group_name(name),
            Err(ValidationError::Required { field: "name" })
        );
        assert_eq!(
            validate_member_name(name),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn test_length_limits_count_characters() {
        let at_limit = "é".repeat(MAX_MEMBER_NAME_LEN);
        assert!(validate_member_name(&at_limit).is_ok());

        let over = "a".repeat(MAX_MEMBER_NAME_LEN + 1);
        assert_eq!(
            validate_member_name(&over),
            Err(ValidationError::TooLong {
                field: "name",
                max: MAX_MEMBER_NAME_LEN
            })
        );

        assert!(validate_group_name(&"g".repeat(MAX_GROUP_NAME_LEN)).is_ok());
        assert!(validate_group_name(&"g".repeat(MAX_GROUP_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_description_limits() {
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LEN)).is_ok());
        assert_eq!(
            validate_description(&"d".repeat(MAX_DESCRIPTION_LEN + 1)),
            Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN
            })
        );
        assert_eq!(
            validate_description(" "),
            Err(ValidationError::Required {
                field: "description"
            })
        );
    }

    #[rstest]
    #[case(dec!(0.01), 1)]
    #[case(dec!(74.20), 7420)]
    #[case(dec!(12.345), 1235)]
    #[case(dec!(120), 12000)]
    fn test_valid_amounts(#[case] amount: Decimal, #[case] cents: i64) {
        assert_eq!(validate_amount(amount), Ok(Cents(cents)));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(0.009))]
    #[case(dec!(-5))]
    fn test_amount_too_small(#[case] amount: Decimal) {
        assert_eq!(validate_amount(amount), Err(ValidationError::AmountTooSmall));
    }

    #[rstest]
    #[case(dec!(21474836.48))]
    #[case(dec!(50000000000000000))]
    #[case(Decimal::MAX)]
    fn test_amount_too_large(#[case] amount: Decimal) {
        assert_eq!(validate_amount(amount), Err(ValidationError::AmountTooLarge));
    }

    #[test]
    fn test_amount_at_limit() {
        assert_eq!(
            validate_amount(dec!(21474836.47)),
            Ok(Cents(MAX_AMOUNT_CENTS))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::Required { field: "name" }.to_string(),
            "The name field is required"
        );
        assert_eq!(
            ValidationError::TooLong {
                field: "description",
                max: 140
            }
            .to_string(),
            "The description field may not be greater than 140 characters"
        );
    }

    #[test]
    fn test_converts_to_app_error() {
        let err: AppError = ValidationError::AmountTooSmall.into();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.to_string(), "Validation error: The amount must be at least 0.01");
    }
}
