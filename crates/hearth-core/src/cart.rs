//! # Cart
//!
//! The shopping cart: an ordered list of (product, quantity) lines.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Cart Operations                                │
//! │                                                                         │
//! │  Screen Action            Operation               Line Change           │
//! │  ─────────────            ─────────               ───────────           │
//! │                                                                         │
//! │  "Add to cart" ─────────► add(p, q) ────────────► qty += q / push line │
//! │                                                                         │
//! │  "+" button ────────────► increment(id) ────────► qty += 1             │
//! │                                                                         │
//! │  "−" button ────────────► decrement(id) ────────► qty -= 1, 0 removes  │
//! │                                                                         │
//! │  Trash icon ────────────► remove(id) ───────────► line removed         │
//! │                                                                         │
//! │  After checkout ────────► clear() ──────────────► items emptied        │
//! │                                                                         │
//! │  NOTE: No operation fails. Unknown ids and zero quantities are          │
//! │        silent no-ops; quantities and line counts are clamped.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{OrderItem, Product};
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

/// A line in the cart.
///
/// ## Design Notes
/// The whole product is kept by value. The cart keeps showing the product
/// it was filled with even if the catalog entry is later edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Product at time of adding (frozen).
    pub product: Product,

    /// Quantity in cart, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    /// Freezes this line into an order item.
    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            product_id: self.product.id.clone(),
            quantity: self.quantity,
            name: self.product.name.clone(),
            price: self.product.price,
        }
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product merges)
/// - Quantity is between 1 and [`MAX_ITEM_QUANTITY`]
/// - At most [`MAX_CART_LINES`] lines
/// - Line order is insertion order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds `quantity` units of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantities are summed
    /// - Product not in cart: a new line is appended
    /// - `quantity == 0`: nothing happens
    /// - Cart already at [`MAX_CART_LINES`]: a new product is ignored
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(quantity).min(MAX_ITEM_QUANTITY);
            return;
        }

        if self.items.len() >= MAX_CART_LINES {
            return;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: quantity.min(MAX_ITEM_QUANTITY),
        });
    }

    /// Removes the line for a product. Unknown ids are ignored.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Adds one unit to an existing line.
    pub fn increment(&mut self, product_id: &str) {
        if let Some(item) = self.find_mut(product_id) {
            item.quantity = item.quantity.saturating_add(1).min(MAX_ITEM_QUANTITY);
        }
    }

    /// Takes one unit off a line; the last unit removes the line.
    pub fn decrement(&mut self, product_id: &str) {
        let Some(item) = self.find_mut(product_id) else {
            return;
        };

        if item.quantity <= 1 {
            self.remove(product_id);
        } else {
            item.quantity -= 1;
        }
    }

    /// Restores the invariants on a cart that came from outside, such as a
    /// saved snapshot.
    ///
    /// Lines with quantity 0 are dropped, duplicate product ids are merged
    /// into the first line, quantities are clamped to [`MAX_ITEM_QUANTITY`]
    /// and lines past [`MAX_CART_LINES`] are cut.
    pub fn normalize(&mut self) {
        let mut normalized = Cart::new();
        for item in self.items.drain(..) {
            normalized.add(&item.product, item.quantity);
        }
        *self = normalized;
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantity (the badge on the cart tab).
    pub fn count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of a product in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Freezes every line into order items.
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(CartItem::to_order_item).collect()
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product.id == product_id)
    }
}

/// Cart totals summary for front-end responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u32,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.count(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_units(price),
            old_price: None,
            product_type: "Chairs".to_string(),
            rating: 4.0,
            image_url: String::new(),
            purchase_count: 0,
            description: String::new(),
            in_stock: true,
        }
    }

    #[test]
    fn test_cart_add_same_product_sums_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000);

        cart.add(&product, 2);
        cart.add(&product, 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("1"), 5);
        assert_eq!(cart.total(), Money::from_units(5000));
    }

    #[test]
    fn test_cart_normalize_repairs_lines() {
        let line = |id: &str, quantity: u32| CartItem {
            product: test_product(id, 100),
            quantity,
        };
        let mut cart = Cart {
            items: vec![line("a", 0), line("b", u32::MAX), line("c", 2), line("c", 3)],
        };

        cart.normalize();

        assert_eq!(cart.quantity_of("a"), 0);
        assert_eq!(cart.quantity_of("b"), MAX_ITEM_QUANTITY);
        assert_eq!(cart.quantity_of("c"), 5);
        assert_eq!(cart.line_count(), 2);

        cart.increment("b");
        assert_eq!(cart.quantity_of("b"), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_normalize_truncates_lines() {
        let mut cart = Cart {
            items: (0..MAX_CART_LINES + 5)
                .map(|i| CartItem {
                    product: test_product(&i.to_string(), 1),
                    quantity: 1,
                })
                .collect(),
        };

        cart.normalize();
        assert_eq!(cart.line_count(), MAX_CART_LINES);
    }

    #[test]
    fn test_cart_increment_past_limit_is_clamped() {
        let mut cart = Cart {
            items: vec![CartItem {
                product: test_product("x", 1),
                quantity: u32::MAX,
            }],
        };
        cart.increment("x");
        assert_eq!(cart.quantity_of("x"), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_total_with_huge_price_saturates() {
        let mut cart = Cart::new();
        cart.add(&test_product("big", i64::MAX), 2);
        cart.add(&test_product("small", 10), 1);

        assert_eq!(cart.total(), Money::from_units(i64::MAX));
    }

    #[test]
    fn test_cart_totals() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 1000), 2);
        cart.add(&test_product("b", 500), 1);

        assert_eq!(cart.total(), Money::from_units(2500));
        assert_eq!(cart.count(), 3);

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn test_cart_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&test_product("b", 1), 1);
        cart.add(&test_product("a", 1), 1);
        cart.add(&test_product("b", 1), 1);

        let ids: Vec<_> = cart.items.iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_decrement_last_unit_removes_line() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 1);

        cart.decrement("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 2);
        let before = cart.clone();

        cart.decrement("missing");
        cart.increment("missing");
        cart.remove("missing");

        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 2);

        cart.increment("1");
        assert_eq!(cart.quantity_of("1"), 3);

        cart.decrement("1");
        cart.decrement("1");
        assert_eq!(cart.quantity_of("1"), 1);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_clamped() {
        let mut cart = Cart::new();
        let product = test_product("1", 1);

        cart.add(&product, MAX_ITEM_QUANTITY);
        cart.add(&product, 5);
        cart.increment("1");

        assert_eq!(cart.quantity_of("1"), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_line_count_clamped() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_LINES + 5 {
            cart.add(&test_product(&i.to_string(), 1), 1);
        }
        assert_eq!(cart.line_count(), MAX_CART_LINES);

        // Existing lines still merge when full
        cart.add(&test_product("0", 1), 1);
        assert_eq!(cart.quantity_of("0"), 2);
    }

    #[test]
    fn test_order_items_snapshot_name_and_price() {
        let mut cart = Cart::new();
        cart.add(&test_product("7", 12350), 2);

        let items = cart.to_order_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "7");
        assert_eq!(items[0].name, "Product 7");
        assert_eq!(items[0].price, Money::from_units(12350));
        assert_eq!(items[0].line_total(), Money::from_units(24700));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }
}
