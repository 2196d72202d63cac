//! # Checkout Commands
//!
//! Turning the cart into an order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order(form)                                    │
//! │                                                                         │
//! │  1. Signed in? ──── no ───► UNAUTHORIZED  t("pleaseLogin")              │
//! │        │                                                                │
//! │  2. Cart empty? ─── yes ──► BUSINESS_LOGIC t("yourCartIsEmpty")         │
//! │        │                                                                │
//! │  3. Form complete? ─ no ──► VALIDATION_ERROR t("fillAllFields")         │
//! │        │                    (courier: address, city, postal code;       │
//! │        │                     always: phone)                             │
//! │        ▼                                                                │
//! │  4. Simulated payment (checkout latency)                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  5. orders.add(Processing order, total = cart + delivery fee)          │
//! │  6. cart.clear()            ◄── two independent snapshot writes         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use hearth_core::checkout::{build_order, CheckoutForm, CheckoutSummary, DeliveryMethod};
use hearth_core::Order;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// A placed order plus the toast to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: Order,
    pub message: String,
}

/// Price breakdown for the current cart and delivery method.
pub fn checkout_summary(state: &AppState, delivery_method: DeliveryMethod) -> CheckoutSummary {
    let fee = state.config.courier_fee;
    state
        .cart
        .with_cart(|cart| CheckoutSummary::new(cart, delivery_method, fee))
}

/// Places an order for the signed-in user from the current cart.
///
/// Nothing changes unless every check passes; on success the order is
/// appended as Processing and the cart is emptied.
pub async fn place_order(state: &AppState, form: CheckoutForm) -> ApiResult<PlacedOrder> {
    let language = state.language.current();
    debug!(delivery = ?form.delivery_method, payment = ?form.payment_method, "place_order command");

    let user = state
        .auth
        .require_user()
        .map_err(|e| ApiError::localized(e, language))?;

    let cart = state.cart.snapshot();
    let order = build_order(&user, &cart, &form, state.config.courier_fee, Utc::now())
        .map_err(|e| ApiError::localized(e, language))?;

    // Simulated payment processing
    tokio::time::sleep(state.config.latency.checkout()).await;

    info!(
        order_id = %order.id,
        user_id = %user.id,
        items = order.item_count(),
        total = %order.total,
        "Order placed"
    );
    state.orders.add(order.clone());
    state.cart.clear();

    Ok(PlacedOrder {
        order,
        message: state.t("orderPlacedSuccess"),
    })
}
