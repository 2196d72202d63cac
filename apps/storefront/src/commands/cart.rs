//! # Cart Commands
//!
//! Commands behind the cart tab and the "Add to cart" button.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Form    │     │ Placed   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       place_order        │
//! │                   increment / decrement            (checkout.rs)       │
//! │                   remove_from_cart                       │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ─────────────────► (back to empty)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use hearth_core::cart::{Cart, CartItem, CartTotals};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{CartState, CatalogState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line with a snapshot of the
///   product (later catalog edits don't change it)
/// - Quantity defaults to 1; 0 changes nothing
///
/// ## Errors
/// `NOT_FOUND` if the product is not in the catalog.
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
    quantity: Option<u32>,
) -> ApiResult<CartResponse> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id, quantity, "add_to_cart command");

    let product = catalog
        .get(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    Ok(cart.with_cart_mut(|c| {
        c.add(&product, quantity);
        CartResponse::from(&*c)
    }))
}

/// Increases a line by one. Unknown ids change nothing.
pub fn increment_item(cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id, "increment_item command");
    cart.with_cart_mut(|c| {
        c.increment(product_id);
        CartResponse::from(&*c)
    })
}

/// Decreases a line by one; a line at 1 is removed.
pub fn decrement_item(cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id, "decrement_item command");
    cart.with_cart_mut(|c| {
        c.decrement(product_id);
        CartResponse::from(&*c)
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        c.remove(product_id);
        CartResponse::from(&*c)
    })
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::AppState;
    use hearth_core::Money;

    #[test]
    fn test_add_twice_merges_line() {
        let state = AppState::in_memory();
        let product = state.catalog.get("1").unwrap();

        add_to_cart(&state.catalog, &state.cart, "1", Some(2)).unwrap();
        let response = add_to_cart(&state.catalog, &state.cart, "1", Some(3)).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 5);
        assert_eq!(response.totals.total, product.price * 5);
    }

    #[test]
    fn test_add_unknown_product() {
        let state = AppState::in_memory();
        let err = add_to_cart(&state.catalog, &state.cart, "nope", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&state.cart).items.is_empty());
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let state = AppState::in_memory();
        add_to_cart(&state.catalog, &state.cart, "1", None).unwrap();

        let response = decrement_item(&state.cart, "1");
        assert!(response.items.is_empty());

        // Absent id is a no-op
        let response = decrement_item(&state.cart, "1");
        assert_eq!(response.totals.item_count, 0);
    }

    #[test]
    fn test_increment_remove_clear() {
        let state = AppState::in_memory();
        add_to_cart(&state.catalog, &state.cart, "1", None).unwrap();
        add_to_cart(&state.catalog, &state.cart, "2", None).unwrap();

        assert_eq!(increment_item(&state.cart, "1").totals.item_count, 3);
        assert_eq!(remove_from_cart(&state.cart, "2").totals.line_count, 1);

        let cleared = clear_cart(&state.cart);
        assert!(cleared.items.is_empty());
        assert_eq!(cleared.totals.total, Money::zero());
    }
}
