//! # Validation Module
//!
//! Input validation for the account, checkout and admin forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen / CLI arguments                                       │
//! │  ├── Type validation (parsing, deserialization)                        │
//! │  └── Immediate feedback                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands (apps/storefront)                                   │
//! │  └── THIS MODULE: form rules, checked before any store mutation        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores                                                       │
//! │  ├── Uniqueness (email already registered)                             │
//! │  └── Order state machine                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure maps onto a translation key via
//! [`ValidationError::message_key`].
//!
//! ## Usage
//! ```rust
//! use hearth_core::validation::{validate_email, validate_sign_in};
//!
//! assert!(validate_email("user@example.com").is_ok());
//! assert!(validate_sign_in("user@example.com", "").is_err());
//! ```

use crate::catalog::ProductDraft;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PRODUCT_TYPES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted display name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LENGTH: usize = 200;

/// Highest price the admin form accepts, in whole units.
pub const MAX_PRODUCT_PRICE: i64 = 1_000_000_000;

// =============================================================================
// Helpers
// =============================================================================

/// Fails with `Required` when the value is blank.
pub fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Account Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank
/// - No whitespace, exactly one `@`, non-empty local part
/// - The domain has a dot with something on both sides
///
/// ## Example
/// ```rust
/// use hearth_core::validation::validate_email;
///
/// assert!(validate_email("admin@example.com").is_ok());
/// assert!(validate_email("admin@example").is_err());
/// assert!(validate_email("admin example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    require("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must contain exactly one @ after a name"));
    }

    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !has_inner_dot {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a display name.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    require("name", name)?;

    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates the sign-in form. Only presence is checked; the credentials
/// themselves are checked by the auth store.
pub fn validate_sign_in(email: &str, password: &str) -> ValidationResult<()> {
    require("email", email)?;
    require("password", password)?;
    Ok(())
}

/// Validates the sign-up form.
///
/// ## Order of Checks
/// ```text
/// name ──► email present ──► password present ──► email format ──► confirmation
/// ```
pub fn validate_sign_up(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<()> {
    require("name", name)?;
    require("email", email)?;
    require("password", password)?;
    validate_email(email)?;
    validate_name(name)?;

    if password != confirm_password {
        return Err(ValidationError::Mismatch {
            field: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a search query. Blank is allowed and returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if !(1..=MAX_PRODUCT_PRICE).contains(&price.units()) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_PRODUCT_PRICE,
        });
    }
    Ok(())
}

/// Validates the admin product form.
///
/// ## Rules
/// - Name present and at most 200 characters
/// - Price within 1 to [`MAX_PRODUCT_PRICE`]; old price, when given, too
/// - Type is one of [`PRODUCT_TYPES`]
/// - Rating within 0 to 5
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    require("name", &draft.name)?;
    if draft.name.trim().chars().count() > MAX_PRODUCT_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LENGTH,
        });
    }

    validate_price("price", draft.price)?;
    if let Some(old_price) = draft.old_price {
        validate_price("oldPrice", old_price)?;
    }

    require("type", &draft.product_type)?;
    if !PRODUCT_TYPES.contains(&draft.product_type.as_str()) {
        return Err(ValidationError::InvalidFormat {
            field: "type".to_string(),
            reason: format!("unknown product type '{}'", draft.product_type),
        });
    }

    if !(0.0..=5.0).contains(&draft.rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("user@example").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("user@example.").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@@example.com").is_err());
        assert!(validate_email("us er@example.com").is_err());
    }

    #[test]
    fn test_validate_sign_in() {
        assert!(validate_sign_in("user@example.com", "password").is_ok());

        let err = validate_sign_in("", "password").unwrap_err();
        assert_eq!(err.message_key(), "pleaseEnterEmail");

        let err = validate_sign_in("user@example.com", " ").unwrap_err();
        assert_eq!(err.message_key(), "pleaseEnterPassword");
    }

    #[test]
    fn test_validate_sign_up() {
        assert!(validate_sign_up("Jane", "jane@example.com", "secret", "secret").is_ok());

        let err = validate_sign_up("", "jane@example.com", "secret", "secret").unwrap_err();
        assert_eq!(err.message_key(), "pleaseEnterName");

        let err = validate_sign_up("Jane", "jane@", "secret", "secret").unwrap_err();
        assert_eq!(err.message_key(), "invalidEmail");

        let err = validate_sign_up("Jane", "jane@example.com", "secret", "secreT").unwrap_err();
        assert_eq!(err.message_key(), "passwordsNotMatch");
    }

    #[test]
    fn test_validate_name_length() {
        assert!(validate_name("Jane").is_ok());
        assert!(validate_name(&"A".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  sofa ").unwrap(), "sofa");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product_draft() {
        let valid = ProductDraft {
            name: "Oak Stool".to_string(),
            price: Money::from_units(4990),
            ..Default::default()
        };
        assert!(validate_product_draft(&valid).is_ok());

        let no_price = ProductDraft {
            price: Money::zero(),
            ..valid.clone()
        };
        assert!(validate_product_draft(&no_price).is_err());

        let bad_type = ProductDraft {
            product_type: "Spaceships".to_string(),
            ..valid.clone()
        };
        assert!(validate_product_draft(&bad_type).is_err());

        let bad_rating = ProductDraft {
            rating: 5.5,
            ..valid.clone()
        };
        assert!(validate_product_draft(&bad_rating).is_err());

        let bad_old_price = ProductDraft {
            old_price: Some(Money::from_units(-1)),
            ..valid.clone()
        };
        assert!(validate_product_draft(&bad_old_price).is_err());
    }

    #[test]
    fn test_validate_product_draft_price_ceiling() {
        let at_ceiling = ProductDraft {
            name: "Throne".to_string(),
            price: Money::from_units(MAX_PRODUCT_PRICE),
            ..Default::default()
        };
        assert!(validate_product_draft(&at_ceiling).is_ok());

        let huge = ProductDraft {
            price: Money::from_units(i64::MAX),
            ..at_ceiling.clone()
        };
        assert!(matches!(
            validate_product_draft(&huge),
            Err(ValidationError::OutOfRange { max: MAX_PRODUCT_PRICE, .. })
        ));

        let huge_old = ProductDraft {
            old_price: Some(Money::from_units(MAX_PRODUCT_PRICE + 1)),
            ..at_ceiling
        };
        assert!(validate_product_draft(&huge_old).is_err());
    }
}
