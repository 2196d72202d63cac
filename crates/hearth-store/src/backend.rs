//! # Key-Value Backends
//!
//! Where snapshot strings actually live.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   KeyValueBackend (trait)                                               │
//! │        │                                                                │
//! │        ├── FileBackend    <data_dir>/<key>.json                         │
//! │        │                  write: <key>.json.tmp ──rename──► <key>.json  │
//! │        │                                                                │
//! │        └── MemoryBackend  Mutex<HashMap<key, value>>   (tests)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rename makes each write all-or-nothing: a reader sees the previous
//! snapshot or the new one, never half of one.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A string key-value store.
pub trait KeyValueBackend: Send + Sync + Debug {
    /// Reads a value. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes a value. A missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-process storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// One JSON file per key in a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Opens (creating if needed) a data directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|e| {
            StoreError::StoragePath(format!("cannot create {}: {}", root.display(), e))
        })?;
        if !root.is_dir() {
            return Err(StoreError::StoragePath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        debug!(path = %root.display(), "File storage opened");
        Ok(FileBackend { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| StoreError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(key, e))?;

        debug!(key, bytes = value.len(), "Snapshot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

/// Keys become file names: lowercase ASCII, digits, `-` and `_` only.
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("cart-storage").unwrap(), None);

        backend.set("cart-storage", "{}").unwrap();
        assert_eq!(backend.get("cart-storage").unwrap().as_deref(), Some("{}"));
        assert_eq!(backend.len(), 1);

        backend.remove("cart-storage").unwrap();
        backend.remove("cart-storage").unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_file_backend_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.set("theme-storage", r#"{"theme":"dark"}"#).unwrap();

        let path = dir.path().join("theme-storage.json");
        assert_eq!(fs::read_to_string(path).unwrap(), r#"{"theme":"dark"}"#);
        assert!(!dir.path().join("theme-storage.json.tmp").exists());
    }

    #[test]
    fn test_file_backend_overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.set("k", "one").unwrap();
        backend.set("k", "two").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("two"));

        backend.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
        // Removing again is fine
        backend.remove("k").unwrap();
    }

    #[test]
    fn test_file_backend_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let backend = FileBackend::open(&nested).unwrap();
        assert_eq!(backend.root(), nested.as_path());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_file_backend_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", "Upper", "dot.json"] {
            assert!(matches!(
                backend.set(key, "x"),
                Err(StoreError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_file_backend_open_on_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            FileBackend::open(file.path()),
            Err(StoreError::StoragePath(_))
        ));
    }
}
