//! # hearth-core: Pure Storefront Logic for Hearth
//!
//! This crate is the **heart** of the Hearth storefront. It contains the
//! business rules of the shop as plain data types and pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Hearth Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Front end (mobile screens / hearth CLI)           │   │
//! │  │   Catalog ──► Product ──► Cart ──► Checkout ──► Account/Admin   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Store states (apps/storefront)                     │   │
//! │  │   CartState, AuthState, OrderState, CatalogState, prefs         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hearth-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ ┌──────────────┐  │   │
//! │  │  │ types  │ │  cart  │ │ catalog │ │ order  │ │ access/auth  │  │   │
//! │  │  │ money  │ │ totals │ │ search  │ │ status │ │ i18n/checkout│  │   │
//! │  │  └────────┘ └────────┘ └─────────┘ └────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO SLEEPING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 hearth-store (Persistence Layer)                │   │
//! │  │            Versioned JSON snapshots in key-value storage        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, Order, etc.)
//! - [`money`] - Integer money amounts
//! - [`cart`] - Cart lines and totals
//! - [`catalog`] - Search, filter and sort over the product list
//! - [`order`] - Order book and the order status state machine
//! - [`auth`] - Session snapshot and the mock user directory
//! - [`access`] - Role capabilities for the admin panel
//! - [`checkout`] - Checkout form, delivery fee, order construction
//! - [`i18n`] - Translation tables with language fallback
//! - [`validation`] - Form validation rules
//! - [`seed`] - Mock catalog, users and orders
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use hearth_core::cart::Cart;
//! use hearth_core::seed;
//!
//! let products = seed::products();
//! let mut cart = Cart::new();
//!
//! cart.add(&products[0], 2);
//! cart.add(&products[0], 1);
//!
//! assert_eq!(cart.count(), 3);
//! assert_eq!(cart.total(), products[0].price * 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod i18n;
pub mod money;
pub mod order;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct lines allowed in a single cart.
///
/// Adding a new product to a full cart is silently ignored; cart operations
/// never fail.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Quantities above this are clamped, not rejected.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// The shared password every mock account accepts.
pub const MOCK_PASSWORD: &str = "password";
