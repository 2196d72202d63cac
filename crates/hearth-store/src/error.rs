//! # Storage Error Types
//!
//! Error types for snapshot persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the storage key as context            │
//! │       │                                                                 │
//! │       ├──► Store state: logged with warn!, state kept in memory        │
//! │       │                                                                 │
//! │       └──► ApiError (storefront app) ← Surfaced by explicit commands   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Snapshot persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    /// - Rename of the temp file failed
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - Stored value is not valid JSON
    /// - The state shape changed without a version bump
    #[error("Snapshot '{key}' could not be (de)serialized: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A snapshot was written by an incompatible version.
    #[error("Snapshot '{key}' has version {found}, expected {expected}")]
    UnsupportedVersion { key: String, found: u32, expected: u32 },

    /// Storage keys map to file names and must stay simple.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The data directory cannot be used.
    #[error("Storage path error: {0}")]
    StoragePath(String),
}

impl StoreError {
    pub(crate) fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }

    pub(crate) fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Serialization {
            key: key.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
