//! # Storage Handle
//!
//! Opening the key-value storage and handing out typed repositories.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storage Startup                                  │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageConfig::new(data_dir) ← Where snapshots live                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storage::open(config) ← Create directory, pick backend                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │        Arc<dyn KeyValueBackend>          │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │ shared by every repository                                      │
//! │       ▼                                                                 │
//! │  storage.cart()   storage.auth()   storage.orders()                     │
//! │  storage.theme()  storage.language()                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use hearth_core::auth::Session;
use hearth_core::cart::Cart;
use hearth_core::order::OrderBook;
use tracing::info;

use crate::backend::{FileBackend, KeyValueBackend, MemoryBackend};
use crate::error::StoreResult;
use crate::repository::{
    LanguageSettings, SnapshotRepository, ThemeSettings, ALL_KEYS, AUTH_KEY, CART_KEY,
    LANGUAGE_KEY, ORDER_KEY, THEME_KEY,
};

// =============================================================================
// Configuration
// =============================================================================

/// Storage configuration.
///
/// ## Example
/// ```rust,no_run
/// use hearth_store::{Storage, StorageConfig};
///
/// let storage = Storage::open(StorageConfig::new("./hearth-data"))?;
/// # Ok::<(), hearth_store::StoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` per store.
    /// `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// File storage in the given directory. Created if missing.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Process-local storage (for testing).
    pub fn in_memory() -> Self {
        StorageConfig { data_dir: None }
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Main storage handle providing repository access.
///
/// Cheap to clone; clones share the backend.
#[derive(Debug, Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueBackend>,
}

impl Storage {
    /// Opens storage as configured.
    pub fn open(config: StorageConfig) -> StoreResult<Self> {
        let backend: Arc<dyn KeyValueBackend> = match &config.data_dir {
            Some(dir) => {
                info!(path = %dir.display(), "Opening file storage");
                Arc::new(FileBackend::open(dir)?)
            }
            None => {
                info!("Opening in-memory storage");
                Arc::new(MemoryBackend::new())
            }
        };
        Ok(Storage { backend })
    }

    /// Fresh in-memory storage.
    pub fn in_memory() -> Self {
        Storage {
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    /// Storage over a caller-supplied backend.
    pub fn with_backend(backend: Arc<dyn KeyValueBackend>) -> Self {
        Storage { backend }
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }

    pub fn cart(&self) -> SnapshotRepository<Cart> {
        SnapshotRepository::new(CART_KEY, Arc::clone(&self.backend))
    }

    pub fn auth(&self) -> SnapshotRepository<Session> {
        SnapshotRepository::new(AUTH_KEY, Arc::clone(&self.backend))
    }

    pub fn orders(&self) -> SnapshotRepository<OrderBook> {
        SnapshotRepository::new(ORDER_KEY, Arc::clone(&self.backend))
    }

    pub fn theme(&self) -> SnapshotRepository<ThemeSettings> {
        SnapshotRepository::new(THEME_KEY, Arc::clone(&self.backend))
    }

    pub fn language(&self) -> SnapshotRepository<LanguageSettings> {
        SnapshotRepository::new(LANGUAGE_KEY, Arc::clone(&self.backend))
    }

    /// Deletes every persisted key.
    pub fn reset(&self) -> StoreResult<()> {
        info!("Resetting all persisted state");
        for key in ALL_KEYS {
            self.backend.remove(key)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{seed, Theme};

    #[test]
    fn test_config_builder() {
        let config = StorageConfig::new("/tmp/hearth");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/hearth")));
        assert_eq!(StorageConfig::in_memory().data_dir, None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let storage = Storage::open(StorageConfig::new(dir.path())).unwrap();
        storage
            .orders()
            .save(&OrderBook::new(seed::orders()))
            .unwrap();
        storage
            .theme()
            .save(&ThemeSettings { theme: Theme::Dark })
            .unwrap();
        drop(storage);

        let reopened = Storage::open(StorageConfig::new(dir.path())).unwrap();
        let orders = reopened.orders().load().unwrap().unwrap();
        assert_eq!(orders.len(), 5);
        assert_eq!(
            reopened.theme().restore(ThemeSettings::default).theme,
            Theme::Dark
        );
        assert!(dir.path().join("order-storage.json").exists());
    }

    #[test]
    fn test_reset_removes_everything() {
        let storage = Storage::in_memory();
        storage.cart().save(&Cart::new()).unwrap();
        storage.auth().save(&Session::default()).unwrap();

        storage.reset().unwrap();
        assert_eq!(storage.cart().load().unwrap(), None);
        assert_eq!(storage.auth().load().unwrap(), None);
    }

    #[test]
    fn test_clones_share_backend() {
        let storage = Storage::in_memory();
        let clone = storage.clone();
        clone
            .theme()
            .save(&ThemeSettings { theme: Theme::Dark })
            .unwrap();
        assert!(storage.theme().load().unwrap().is_some());
    }
}
