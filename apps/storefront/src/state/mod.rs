//! # State Module
//!
//! The storefront's stores, one focused state type each, owned together by
//! [`AppState`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  AppState::bootstrap(config, storage)                           │   │
//! │  │  restores every store from its snapshot once, at startup        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌──────────────┬─────────┼────────┬──────────────┬──────────┐      │
//! │     ▼              ▼         ▼        ▼              ▼          ▼       │
//! │  CartState    AuthState  OrderState CatalogState LanguageState Theme   │
//! │  cart-storage auth-      order-     (memory)     language-     theme-  │
//! │               storage    storage                 storage       storage │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Every store: Arc<Mutex<T>>, clones share state                       │
//! │  • No lock is held across an .await                                     │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod catalog;
mod config;
mod order;
mod preferences;

pub use auth::AuthState;
pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigResult, ConfigState, LatencyConfig, CONFIG_FILE_NAME};
pub use order::OrderState;
pub use preferences::{LanguageState, ThemeState};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hearth_store::Storage;
use tracing::info;

/// Locks a store mutex. A panic in another holder does not take the
/// store down with it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Loading Flag
// =============================================================================

/// Store state with an in-flight counter and an error slot.
pub(crate) trait Loading {
    fn pending_mut(&mut self) -> &mut usize;
    fn error_mut(&mut self) -> &mut Option<String>;
}

/// Marks an operation in flight for as long as it lives.
///
/// Created at the start of an async store operation; dropping it (normal
/// return, error, or the future being abandoned) ends the operation.
pub(crate) struct LoadingGuard<T: Loading> {
    inner: Arc<Mutex<T>>,
}

impl<T: Loading> LoadingGuard<T> {
    /// Starting an operation clears the previous error.
    pub(crate) fn start(inner: &Arc<Mutex<T>>) -> Self {
        let mut state = lock(inner);
        *state.pending_mut() += 1;
        *state.error_mut() = None;
        LoadingGuard {
            inner: Arc::clone(inner),
        }
    }
}

impl<T: Loading> Drop for LoadingGuard<T> {
    fn drop(&mut self) {
        let mut state = lock(&self.inner);
        let pending = state.pending_mut();
        *pending = pending.saturating_sub(1);
    }
}

// =============================================================================
// AppState
// =============================================================================

/// Every store, wired to one storage and one configuration.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ConfigState>,
    pub storage: Storage,
    pub cart: CartState,
    pub auth: AuthState,
    pub orders: OrderState,
    pub catalog: CatalogState,
    pub language: LanguageState,
    pub theme: ThemeState,
}

impl AppState {
    /// Restores every store from `storage`.
    ///
    /// Snapshots that are missing or unusable fall back to defaults: an
    /// empty cart, no session, the mock order history, light theme and the
    /// configured language.
    pub fn bootstrap(config: ConfigState, storage: Storage) -> Self {
        let latency = config.latency;
        let language = LanguageState::restore(&storage, config.default_language);
        let theme = ThemeState::restore(&storage);
        let cart = CartState::restore(&storage);
        let orders = OrderState::restore(&storage);
        let auth = AuthState::restore(
            &storage,
            language.clone(),
            &config.mock_password,
            latency.auth(),
        );
        let catalog = CatalogState::new(latency.products(), latency.promotions());

        info!(
            store = %config.store_name,
            language = %language.current(),
            cart_items = cart.count(),
            orders = orders.len(),
            signed_in = auth.is_authenticated(),
            "Storefront state initialized"
        );

        AppState {
            config: Arc::new(config),
            storage,
            cart,
            auth,
            orders,
            catalog,
            language,
            theme,
        }
    }

    /// Fresh in-memory state with no simulated latency.
    pub fn in_memory() -> Self {
        let config = ConfigState {
            latency: LatencyConfig::none(),
            ..Default::default()
        };
        Self::bootstrap(config, Storage::in_memory())
    }

    /// Translates `key` into the current language.
    pub fn t(&self, key: &str) -> String {
        self.language.t(key)
    }
}
