//! # Account Commands
//!
//! Sign in, sign up, profile and the user's own orders.
//!
//! Forms are validated here, synchronously, before the auth store is
//! touched. Validation failures come back localized and leave every store
//! unchanged.
//!
//! Emails are passed on exactly as typed: the directory matches them
//! exactly, and the sign-up and profile forms reject whitespace in them.

use hearth_core::auth::Session;
use hearth_core::order::CancelOutcome;
use hearth_core::validation::{validate_email, validate_name, validate_sign_in, validate_sign_up};
use hearth_core::{CoreError, Order, User};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn invalid(state: &AppState, err: impl Into<CoreError>) -> ApiError {
    ApiError::localized(err.into(), state.language.current())
}

/// Validates the sign-in form, then signs in.
pub async fn sign_in(state: &AppState, email: &str, password: &str) -> ApiResult<User> {
    debug!(email, "sign_in command");
    validate_sign_in(email, password).map_err(|e| invalid(state, e))?;
    state.auth.login(email, password).await
}

/// Validates the sign-up form, then registers and signs in.
pub async fn sign_up(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ApiResult<User> {
    debug!(email, "sign_up command");
    validate_sign_up(name, email, password, confirm_password).map_err(|e| invalid(state, e))?;
    state.auth.register(email, password, name.trim()).await
}

/// Profile edits from the "Edit profile" screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub notifications_enabled: Option<bool>,
}

/// Applies profile edits to the signed-in user.
///
/// Returns the updated user and the `profileUpdated` toast.
pub async fn update_profile(state: &AppState, update: ProfileUpdate) -> ApiResult<(User, String)> {
    debug!(?update, "update_profile command");
    let mut user = state.auth.require_user().map_err(|e| invalid(state, e))?;

    if let Some(name) = update.name {
        validate_name(&name).map_err(|e| invalid(state, e))?;
        user.name = name.trim().to_string();
    }
    if let Some(email) = update.email {
        validate_email(&email).map_err(|e| invalid(state, e))?;
        user.email = email;
    }
    if let Some(enabled) = update.notifications_enabled {
        user.notifications_enabled = Some(enabled);
    }

    let user = state.auth.update(user).await?;
    Ok((user, state.t("profileUpdated")))
}

/// Signs out and returns the `loggedOut` toast.
pub fn sign_out(state: &AppState) -> String {
    debug!("sign_out command");
    state.auth.logout();
    state.t("loggedOut")
}

pub fn current_session(state: &AppState) -> Session {
    state.auth.session()
}

// =============================================================================
// Orders
// =============================================================================

/// The signed-in user's orders, oldest first.
pub fn my_orders(state: &AppState) -> ApiResult<Vec<Order>> {
    let user = state.auth.require_user().map_err(|e| invalid(state, e))?;
    Ok(state.orders.user_orders(&user.id))
}

/// One of the signed-in user's orders.
///
/// Orders of other users are reported as not found.
pub fn track_order(state: &AppState, order_id: &str) -> ApiResult<Order> {
    let user = state.auth.require_user().map_err(|e| invalid(state, e))?;
    state
        .orders
        .track(order_id)
        .filter(|o| o.user_id == user.id)
        .ok_or_else(|| ApiError::not_found("Order", order_id))
}

/// Result of a cancel request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub cancelled: bool,
    pub message: Option<String>,
}

/// Cancels one of the signed-in user's Processing orders.
///
/// Already-cancelled orders are a no-op. Shipped and delivered orders are
/// rejected with `BUSINESS_LOGIC`.
pub fn cancel_order(state: &AppState, order_id: &str) -> ApiResult<CancelResponse> {
    debug!(order_id, "cancel_order command");
    track_order(state, order_id)?;

    let outcome = state.orders.cancel(order_id)?;
    let cancelled = outcome == CancelOutcome::Cancelled;
    Ok(CancelResponse {
        cancelled,
        message: cancelled.then(|| state.t("orderCancelled")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use hearth_core::i18n::Language;
    use hearth_core::OrderStatus;

    #[tokio::test]
    async fn test_sign_in_validates_before_store() {
        let state = AppState::in_memory();
        let err = sign_in(&state, "", "password").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, state.t("pleaseEnterEmail"));
        assert_eq!(state.auth.error(), None);
    }

    #[tokio::test]
    async fn test_sign_up_password_mismatch_in_russian() {
        let state = AppState::in_memory();
        state.language.set(Language::Ru);

        let err = sign_up(&state, "Ann", "ann@example.com", "secret1", "secret2")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Пароли не совпадают");
        assert!(!state.auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_padded_email_is_not_trimmed() {
        let state = AppState::in_memory();

        let err = sign_in(&state, " user@example.com ", "password")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(!state.auth.is_authenticated());

        let err = sign_up(&state, "Ann", " ann@example.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!state.auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_update_profile_and_sign_out() {
        let state = AppState::in_memory();
        sign_in(&state, "user@example.com", "password").await.unwrap();

        let (user, message) = update_profile(
            &state,
            ProfileUpdate {
                notifications_enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(user.notifications_enabled, Some(false));
        assert_eq!(message, state.t("profileUpdated"));

        assert_eq!(sign_out(&state), state.t("loggedOut"));
        assert!(current_session(&state).user.is_none());
    }

    #[tokio::test]
    async fn test_orders_require_sign_in() {
        let state = AppState::in_memory();
        assert_eq!(my_orders(&state).unwrap_err().code, ErrorCode::Unauthorized);

        sign_in(&state, "user@example.com", "password").await.unwrap();
        let orders = my_orders(&state).unwrap();
        assert_eq!(orders.len(), state.orders.user_orders("1").len());
    }

    #[tokio::test]
    async fn test_cancel_own_processing_order() {
        let state = AppState::in_memory();
        sign_in(&state, "user@example.com", "password").await.unwrap();

        let response = cancel_order(&state, "order2").unwrap();
        assert!(response.cancelled);
        assert_eq!(
            state.orders.track("order2").map(|o| o.status),
            Some(OrderStatus::Cancelled)
        );

        // Second cancel is a no-op
        assert!(!cancel_order(&state, "order2").unwrap().cancelled);

        let err = cancel_order(&state, "order3").unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_other_users_orders_are_hidden() {
        let state = AppState::in_memory();
        sign_in(&state, "admin@example.com", "password").await.unwrap();
        assert_eq!(
            track_order(&state, "order1").unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
