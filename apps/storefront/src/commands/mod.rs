//! # Commands Module
//!
//! Every operation a front end can invoke, grouped by screen.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── catalog.rs      ◄─── Listing, search, browse, product page
//! ├── cart.rs         ◄─── Cart manipulation
//! ├── checkout.rs     ◄─── Summary and order placement
//! ├── account.rs      ◄─── Sign in/up, profile, own orders
//! ├── admin.rs        ◄─── Admin panel (role-gated)
//! └── preferences.rs  ◄─── Theme and language
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end (`hearth` CLI, or a mobile shell over FFI)                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      &state.catalog,     ◄── Only the stores it needs                  │
//! │      &state.cart,                                                       │
//! │      "3",                ◄── Arguments from the screen                  │
//! │      Some(2),                                                           │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Serializable response, or ApiError { code, message }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that touch several stores, or need the language for messages,
//! take the whole [`crate::state::AppState`].

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod preferences;
