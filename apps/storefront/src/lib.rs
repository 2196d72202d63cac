//! # Hearth Storefront Library
//!
//! Store states and commands for the Hearth furniture storefront, plus the
//! startup helpers the `hearth` binary uses.
//!
//! ## Module Organization
//! ```text
//! hearth_storefront/
//! ├── lib.rs          ◄─── You are here (startup: tracing, storage, state)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState + loading guard
//! │   ├── cart.rs     ◄─── Cart store
//! │   ├── auth.rs     ◄─── Session, user directory
//! │   ├── order.rs    ◄─── Order history
//! │   ├── catalog.rs  ◄─── Products and promotions
//! │   ├── preferences.rs ◄─ Language and theme
//! │   └── config.rs   ◄─── Configuration
//! ├── commands/       ◄─── Screen-level operations
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust
//! use hearth_storefront::commands::cart::add_to_cart;
//! use hearth_storefront::state::AppState;
//!
//! let state = AppState::in_memory();
//! let cart = add_to_cart(&state.catalog, &state.cart, "1", Some(2))?;
//! assert_eq!(cart.totals.item_count, 2);
//! # Ok::<(), hearth_storefront::error::ApiError>(())
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use hearth_store::{Storage, StorageConfig, StoreError, StoreResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{AppState, ConfigState};

/// Opens storage and restores every store.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging (init_tracing, by the binary) ─────────────────► │
/// │                                                                         │
/// │  2. Load Configuration (ConfigState::load) ───────────────────────────► │
/// │     • defaults → hearth.toml → HEARTH_* env                             │
/// │                                                                         │
/// │  3. Determine Data Directory ─────────────────────────────────────────► │
/// │     • config.data_dir if set                                            │
/// │     • Linux: ~/.local/share/hearth/                                     │
/// │     • macOS: ~/Library/Application Support/com.hearth.storefront/       │
/// │     • Windows: %APPDATA%\hearth\storefront\data\                        │
/// │                                                                         │
/// │  4. Open File Storage ────────────────────────────────────────────────► │
/// │                                                                         │
/// │  5. Restore Stores (AppState::bootstrap) ─────────────────────────────► │
/// │     • cart, session, orders, theme, language from snapshots             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn open(config: ConfigState) -> StoreResult<AppState> {
    let data_dir = data_dir(&config)?;
    info!(?data_dir, "Data directory determined");

    let storage = Storage::open(StorageConfig::new(data_dir))?;
    Ok(AppState::bootstrap(config, storage))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=hearth_storefront=trace` - Trace the app crate only
/// - Default: INFO, DEBUG for the hearth crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,hearth=debug,hearth_core=debug,hearth_store=debug,hearth_storefront=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the snapshot directory.
///
/// ## Development Override
/// Set `data_dir` in `hearth.toml` or the `HEARTH_DATA_DIR` environment
/// variable to use a custom path.
pub fn data_dir(config: &ConfigState) -> StoreResult<PathBuf> {
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "hearth", "storefront").ok_or_else(|| {
        StoreError::StoragePath("Could not determine app data directory".to_string())
    })?;

    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_data_dir_wins() {
        let config = ConfigState {
            data_dir: Some(PathBuf::from("/tmp/hearth-test")),
            ..Default::default()
        };
        assert_eq!(data_dir(&config).unwrap(), PathBuf::from("/tmp/hearth-test"));
    }

    #[test]
    fn test_open_creates_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            data_dir: Some(dir.path().join("data")),
            ..Default::default()
        };

        let state = open(config).unwrap();
        state.theme.toggle();
        assert!(dir.path().join("data").join("theme-storage.json").exists());
    }
}
