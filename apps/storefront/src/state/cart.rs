//! # Cart State
//!
//! Manages the shopping cart and persists it after every change.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Checkout clears the cart from another store's flow
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Screen Action            Command                 Cart State Change     │
//! │  ─────────────            ───────                 ─────────────────     │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_to_cart() ───────► merge or push line   │
//! │                                                                         │
//! │  + / − buttons ──────────► increment/decrement ─► qty ± 1 (0 removes)  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ──► items.retain(..)     │
//! │                                                                         │
//! │  "Clear cart" ───────────► clear_cart() ────────► items.clear()        │
//! │                                                                         │
//! │  View Cart ──────────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  Every write ends with a full snapshot save to `cart-storage`.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use hearth_core::cart::{Cart, CartTotals};
use hearth_core::{Money, Product};
use hearth_store::{SnapshotRepository, Storage};
use tracing::{debug, warn};

use super::lock;

/// Shared cart state.
///
/// Uses `Arc<Mutex<Cart>>`: clones share the same cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    repo: SnapshotRepository<Cart>,
}

impl CartState {
    /// Restores the cart from storage, empty when nothing usable is saved.
    ///
    /// The saved lines are normalized, so a hand-edited snapshot cannot
    /// break the quantity and line limits.
    pub fn restore(storage: &Storage) -> Self {
        let repo = storage.cart();
        let mut cart = repo.restore(Cart::new);
        cart.normalize();
        debug!(lines = cart.line_count(), "Cart restored");
        CartState {
            cart: Arc::new(Mutex::new(cart)),
            repo,
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|c| CartTotals::from(c));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = lock(&self.cart);
        f(&cart)
    }

    /// Executes a function with write access to the cart, then saves it.
    ///
    /// The save runs under the same lock, so snapshots land in mutation
    /// order. A failed save is logged; the in-memory cart keeps the change.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = lock(&self.cart);
        let result = f(&mut cart);
        if let Err(e) = self.repo.save(&cart) {
            warn!(error = %e, "Failed to persist cart");
        }
        result
    }

    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    pub fn add(&self, product: &Product, quantity: u32) {
        debug!(product_id = %product.id, quantity, "Cart add");
        self.with_cart_mut(|c| c.add(product, quantity));
    }

    pub fn remove(&self, product_id: &str) {
        debug!(product_id, "Cart remove");
        self.with_cart_mut(|c| c.remove(product_id));
    }

    pub fn increment(&self, product_id: &str) {
        debug!(product_id, "Cart increment");
        self.with_cart_mut(|c| c.increment(product_id));
    }

    /// Decrements a line; at quantity 1 the line is removed.
    pub fn decrement(&self, product_id: &str) {
        debug!(product_id, "Cart decrement");
        self.with_cart_mut(|c| c.decrement(product_id));
    }

    pub fn clear(&self) {
        debug!("Cart clear");
        self.with_cart_mut(Cart::clear);
    }

    pub fn total(&self) -> Money {
        self.with_cart(Cart::total)
    }

    pub fn count(&self) -> u32 {
        self.with_cart(Cart::count)
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(|c| CartTotals::from(c))
    }
}
