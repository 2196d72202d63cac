//! # Error Types
//!
//! Domain-specific error types for hearth-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hearth-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  hearth-store errors (separate crate)                                  │
//! │  └── StoreError       - Snapshot read/write failures                   │
//! │                                                                         │
//! │  Application errors (apps/storefront)                                  │
//! │  └── ApiError         - What the front end sees (code + message)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Toast / banner         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations have no error path at all: out-of-range operations are
//! silent no-ops. Errors here come from checkout, orders and the admin panel.

use thiserror::Error;

use crate::access::Capability;
use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order cannot be found in the order book.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// User cannot be found in the user directory.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The order state machine does not allow this move.
    ///
    /// ## Allowed Transitions
    /// ```text
    /// Processing ──► Shipped ──► Delivered
    ///      │
    ///      └───────► Cancelled
    /// ```
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidOrderTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The operation needs a signed-in user.
    #[error("Sign in required")]
    NotAuthenticated,

    /// The signed-in user's role lacks the capability.
    #[error("Access denied: {capability} requires an admin panel role")]
    AccessDenied { capability: Capability },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised synchronously before any state changes and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must match do not (password confirmation).
    #[error("{field} does not match")]
    Mismatch { field: String },

    /// Duplicate value (e.g., email already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Translation key for the message the front end shows for this error.
    ///
    /// Matches the keys the account and checkout screens use, so a failed
    /// form maps straight onto a localized toast.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::Required { field } => match field.as_str() {
                "email" => "pleaseEnterEmail",
                "password" => "pleaseEnterPassword",
                "name" => "pleaseEnterName",
                _ => "fillAllFields",
            },
            ValidationError::InvalidFormat { field, .. } if field == "email" => "invalidEmail",
            ValidationError::Mismatch { .. } => "passwordsNotMatch",
            ValidationError::Duplicate { field, .. } if field == "email" => "emailInUse",
            _ => "fillAllFields",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidOrderTransition {
            order_id: "order1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Order order1 cannot move from Delivered to Cancelled"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::Mismatch {
            field: "password".to_string(),
        };
        assert_eq!(err.to_string(), "password does not match");
    }

    #[test]
    fn test_message_keys() {
        let required = |field: &str| ValidationError::Required {
            field: field.to_string(),
        };
        assert_eq!(required("email").message_key(), "pleaseEnterEmail");
        assert_eq!(required("name").message_key(), "pleaseEnterName");
        assert_eq!(required("city").message_key(), "fillAllFields");

        let bad_email = ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "missing @".to_string(),
        };
        assert_eq!(bad_email.message_key(), "invalidEmail");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
