//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Hearth                                 │
//! │                                                                         │
//! │  Front end (CLI / mobile)          Rust Backend                         │
//! │  ────────────────────────          ────────────                         │
//! │                                                                         │
//! │  place_order(form)                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── StoreError::Io { key, .. } ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Domain Error? ──── CoreError::EmptyCart ──────── ApiError ────►│  │
//! │  │         │                          (localized via i18n keys)    │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "UNAUTHORIZED", "message": "Please sign in to continue" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use hearth_core::i18n::{lookup, Language};
use hearth_core::CoreError;
use hearth_store::StoreError;
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Order not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// No signed-in user, or wrong credentials
    Unauthorized,

    /// Signed-in user's role lacks the capability
    Forbidden,

    /// Business rule rejected the operation (empty cart, bad transition)
    BusinessLogic,

    /// Local storage read or write failed
    StorageError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Converts a domain error, translating the message into `language`
    /// when the error has a translation key.
    ///
    /// ## Example
    /// ```rust
    /// use hearth_core::i18n::Language;
    /// use hearth_core::CoreError;
    /// use hearth_storefront::error::{ApiError, ErrorCode};
    ///
    /// let err = ApiError::localized(CoreError::NotAuthenticated, Language::Ru);
    /// assert_eq!(err.code, ErrorCode::Unauthorized);
    /// assert_eq!(err.message, "Пожалуйста, войдите в аккаунт");
    /// ```
    pub fn localized(err: CoreError, language: Language) -> Self {
        let key = message_key(&err);
        let mut api = ApiError::from(err);
        if let Some(text) = key.and_then(|k| lookup(language, k).or_else(|| lookup(Language::En, k))) {
            api.message = text.to_string();
        }
        api
    }
}

/// Translation key for errors the screens show as a toast.
fn message_key(err: &CoreError) -> Option<&'static str> {
    match err {
        CoreError::NotAuthenticated => Some("pleaseLogin"),
        CoreError::AccessDenied { .. } => Some("noPermission"),
        CoreError::EmptyCart => Some("yourCartIsEmpty"),
        CoreError::Validation(e) => Some(e.message_key()),
        _ => None,
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::UserNotFound(id) => ApiError::not_found("User", &id),
            err @ CoreError::InvalidOrderTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            err @ CoreError::EmptyCart => ApiError::new(ErrorCode::BusinessLogic, err.to_string()),
            err @ CoreError::NotAuthenticated => ApiError::unauthorized(err.to_string()),
            err @ CoreError::AccessDenied { .. } => {
                ApiError::new(ErrorCode::Forbidden, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!(error = %err, "Storage operation failed");
        match err {
            StoreError::Io { key, .. } | StoreError::Serialization { key, .. } => ApiError::new(
                ErrorCode::StorageError,
                format!("Could not save {}", key),
            ),
            StoreError::UnsupportedVersion { key, .. } => ApiError::new(
                ErrorCode::StorageError,
                format!("Saved {} is from an incompatible version", key),
            ),
            StoreError::InvalidKey(_) | StoreError::StoragePath(_) => {
                ApiError::new(ErrorCode::StorageError, "Local storage is unavailable")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::access::Capability;
    use hearth_core::{OrderStatus, ValidationError};

    #[test]
    fn test_core_error_codes() {
        assert_eq!(
            ApiError::from(CoreError::OrderNotFound("9".into())).code,
            ErrorCode::NotFound
        );
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::BusinessLogic);
        assert_eq!(
            ApiError::from(CoreError::AccessDenied {
                capability: Capability::ManageUsers
            })
            .code,
            ErrorCode::Forbidden
        );

        let transition = ApiError::from(CoreError::InvalidOrderTransition {
            order_id: "3".into(),
            from: OrderStatus::Shipped,
            to: OrderStatus::Cancelled,
        });
        assert_eq!(transition.code, ErrorCode::BusinessLogic);
        assert!(transition.message.contains("Shipped"));
    }

    #[test]
    fn test_localized_validation_message() {
        let err = CoreError::Validation(ValidationError::Mismatch {
            field: "confirmPassword".into(),
        });
        let api = ApiError::localized(err, Language::En);
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.message, "Passwords do not match");
    }

    #[test]
    fn test_localized_keeps_message_without_key() {
        let api = ApiError::localized(CoreError::ProductNotFound("x".into()), Language::Ru);
        assert_eq!(api.message, "Product not found: x");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::unauthorized("nope")).unwrap();
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(json["message"], "nope");
    }
}
