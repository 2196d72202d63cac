//! # Repository Module
//!
//! Typed access to one snapshot key each.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Store state (CartState, AuthState, ...)                                │
//! │       │                                                                 │
//! │       │  storage.cart().save(&cart)                                     │
//! │       ▼                                                                 │
//! │  SnapshotRepository<Cart>                                               │
//! │  ├── load()     → Option<Cart>, errors surfaced                         │
//! │  ├── restore()  → Cart, falls back to a default with a warning          │
//! │  ├── save()     → envelope + backend.set                                │
//! │  └── clear()    → backend.remove                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KeyValueBackend ("cart-storage" → JSON string)                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Keys
//!
//! | Key                | State                         |
//! |--------------------|-------------------------------|
//! | `cart-storage`     | [`hearth_core::cart::Cart`]   |
//! | `auth-storage`     | [`hearth_core::auth::Session`]|
//! | `order-storage`    | [`hearth_core::order::OrderBook`] |
//! | `theme-storage`    | [`ThemeSettings`]             |
//! | `language-storage` | [`LanguageSettings`]          |

pub mod preferences;

pub use preferences::{LanguageSettings, ThemeSettings};

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::KeyValueBackend;
use crate::error::StoreResult;
use crate::snapshot;

pub const CART_KEY: &str = "cart-storage";
pub const AUTH_KEY: &str = "auth-storage";
pub const ORDER_KEY: &str = "order-storage";
pub const THEME_KEY: &str = "theme-storage";
pub const LANGUAGE_KEY: &str = "language-storage";

/// Every key the storefront persists.
pub const ALL_KEYS: [&str; 5] = [CART_KEY, AUTH_KEY, ORDER_KEY, THEME_KEY, LANGUAGE_KEY];

/// Repository for one snapshot key.
#[derive(Debug)]
pub struct SnapshotRepository<T> {
    key: &'static str,
    backend: Arc<dyn KeyValueBackend>,
    _state: PhantomData<fn() -> T>,
}

impl<T> Clone for SnapshotRepository<T> {
    fn clone(&self) -> Self {
        SnapshotRepository {
            key: self.key,
            backend: Arc::clone(&self.backend),
            _state: PhantomData,
        }
    }
}

impl<T> SnapshotRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(key: &'static str, backend: Arc<dyn KeyValueBackend>) -> Self {
        SnapshotRepository {
            key,
            backend,
            _state: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Reads the saved state. Nothing saved yet is `Ok(None)`.
    pub fn load(&self) -> StoreResult<Option<T>> {
        let Some(raw) = self.backend.get(self.key)? else {
            return Ok(None);
        };
        let snapshot = snapshot::decode::<T>(self.key, &raw)?;
        debug!(key = self.key, saved_at = %snapshot.saved_at, "Snapshot loaded");
        Ok(Some(snapshot.state))
    }

    /// Reads the saved state, or builds the default when nothing usable is
    /// stored. Unreadable or foreign-version snapshots are logged and
    /// discarded.
    pub fn restore(&self, default: impl FnOnce() -> T) -> T {
        match self.load() {
            Ok(Some(state)) => state,
            Ok(None) => default(),
            Err(e) => {
                warn!(key = self.key, error = %e, "Discarding unusable snapshot");
                default()
            }
        }
    }

    /// Writes the full state.
    pub fn save(&self, state: &T) -> StoreResult<()> {
        let raw = snapshot::encode(self.key, state)?;
        self.backend.set(self.key, &raw)
    }

    /// Deletes the saved state.
    pub fn clear(&self) -> StoreResult<()> {
        self.backend.remove(self.key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
