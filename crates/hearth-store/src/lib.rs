//! # hearth-store: Persistence Layer for Hearth
//!
//! This crate persists storefront state to a local key-value storage as
//! versioned JSON snapshots, one key per store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Hearth Persistence Flow                            │
//! │                                                                         │
//! │  Store mutation (cart add, login, cancel order, ...)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  hearth-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Storage     │    │ Repositories  │    │  Snapshot    │   │   │
//! │  │   │ (storage.rs)  │    │ (repository/) │    │ (envelope)   │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ FileBackend   │◄───│ Snapshot-     │───►│ version: 1   │   │   │
//! │  │   │ MemoryBackend │    │ Repository<T> │    │ savedAt      │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  <data dir>/cart-storage.json, auth-storage.json, ...           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Storage handle and configuration
//! - [`backend`] - Key-value backends (file, memory)
//! - [`snapshot`] - Versioned envelope encoding
//! - [`repository`] - Typed per-key repositories
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use hearth_core::cart::Cart;
//! use hearth_store::Storage;
//!
//! let storage = Storage::in_memory();
//! storage.cart().save(&Cart::new())?;
//!
//! let cart = storage.cart().restore(Cart::new);
//! assert!(cart.is_empty());
//! # Ok::<(), hearth_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod repository;
pub mod snapshot;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::{StoreError, StoreResult};
pub use repository::{LanguageSettings, SnapshotRepository, ThemeSettings};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use storage::{Storage, StorageConfig};
