//! # Admin Panel Commands
//!
//! Dashboard plus product, user and order management.
//!
//! ## Access Matrix
//! ```text
//! ┌──────────────────┬─────────┬───────────┬─────────┐
//! │ Capability       │ admin   │ moderator │ visitor │
//! ├──────────────────┼─────────┼───────────┼─────────┤
//! │ ViewAdminPanel   │   ✓     │    ✓      │         │
//! │ ManageProducts   │   ✓     │    ✓      │         │
//! │ ManageUsers      │   ✓     │           │         │
//! │ ManageOrders     │   ✓     │           │         │
//! └──────────────────┴─────────┴───────────┴─────────┘
//! ```
//!
//! Every command starts with [`authorize`]. Product and user edits live in
//! memory only; order status changes are persisted with the order history.

use hearth_core::access::{authorize, Capability};
use hearth_core::catalog::ProductDraft;
use hearth_core::validation::{validate_email, validate_name};
use hearth_core::{CoreError, Money, Order, OrderStatus, Product, Role, User};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn guard(state: &AppState, capability: Capability) -> ApiResult<()> {
    let user = state.auth.current_user();
    authorize(user.as_ref(), capability).map_err(|e| localized(state, e))
}

fn localized(state: &AppState, err: impl Into<CoreError>) -> ApiError {
    ApiError::localized(err.into(), state.language.current())
}

// =============================================================================
// Dashboard
// =============================================================================

/// Statistics cards on the dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_users: usize,
    pub total_orders: usize,
    pub total_revenue: Money,
}

pub fn dashboard(state: &AppState) -> ApiResult<DashboardStats> {
    guard(state, Capability::ViewAdminPanel)?;
    Ok(DashboardStats {
        total_products: state.catalog.len(),
        total_users: state.auth.with_directory(|d| d.len()),
        total_orders: state.orders.len(),
        total_revenue: state.orders.total_revenue(),
    })
}

// =============================================================================
// Products
// =============================================================================

pub fn add_product(state: &AppState, draft: ProductDraft) -> ApiResult<Product> {
    guard(state, Capability::ManageProducts)?;
    debug!(name = %draft.name, "add_product command");
    state
        .catalog
        .add_product(draft)
        .map_err(|e| localized(state, e))
}

pub fn update_product(state: &AppState, product_id: &str, draft: ProductDraft) -> ApiResult<Product> {
    guard(state, Capability::ManageProducts)?;
    debug!(product_id, "update_product command");
    state
        .catalog
        .update_product(product_id, draft)
        .map_err(|e| localized(state, e))
}

pub fn delete_product(state: &AppState, product_id: &str) -> ApiResult<Product> {
    guard(state, Capability::ManageProducts)?;
    debug!(product_id, "delete_product command");
    Ok(state.catalog.delete_product(product_id)?)
}

// =============================================================================
// Users
// =============================================================================

/// The user form: everything but the id is editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEdit {
    pub name: String,
    pub email: String,
    pub role: Role,
}

pub fn list_users(state: &AppState) -> ApiResult<Vec<User>> {
    guard(state, Capability::ManageUsers)?;
    Ok(state.auth.with_directory(|d| d.users().to_vec()))
}

/// Edits a user's name, email and role.
///
/// When the edited user is the one signed in, the session picks up the
/// change.
pub fn update_user(state: &AppState, user_id: &str, edit: UserEdit) -> ApiResult<User> {
    guard(state, Capability::ManageUsers)?;
    debug!(user_id, role = %edit.role, "update_user command");

    validate_name(&edit.name).map_err(|e| localized(state, e))?;
    validate_email(&edit.email).map_err(|e| localized(state, e))?;

    let updated = state.auth.with_directory_mut(|directory| {
        let mut user = directory
            .get(user_id)
            .cloned()
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;
        user.name = edit.name.trim().to_string();
        user.email = edit.email;
        user.role = edit.role;
        directory.update(user)
    });
    let user = updated.map_err(|e| localized(state, e))?;

    info!(user_id = %user.id, role = %user.role, "User updated");
    state.auth.refresh_current_user(&user);
    Ok(user)
}

pub fn delete_user(state: &AppState, user_id: &str) -> ApiResult<User> {
    guard(state, Capability::ManageUsers)?;
    let user = state.auth.with_directory_mut(|d| d.remove(user_id))?;
    info!(user_id = %user.id, "User deleted");
    Ok(user)
}

// =============================================================================
// Orders
// =============================================================================

pub fn list_orders(state: &AppState) -> ApiResult<Vec<Order>> {
    guard(state, Capability::ManageOrders)?;
    Ok(state.orders.all())
}

/// Moves an order along Processing → Shipped → Delivered, or cancels a
/// Processing order.
pub fn update_order_status(
    state: &AppState,
    order_id: &str,
    status: OrderStatus,
) -> ApiResult<Order> {
    guard(state, Capability::ManageOrders)?;
    debug!(order_id, %status, "update_order_status command");
    Ok(state.orders.set_status(order_id, status)?)
}
