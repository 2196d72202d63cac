//! # Snapshot Envelope
//!
//! Every persisted value is wrapped in a versioned envelope:
//!
//! ```text
//! {
//!   "version": 1,
//!   "savedAt": "2024-03-01T12:00:00Z",
//!   "state":   { ...store state... }
//! }
//! ```
//!
//! The version is checked before the state is decoded, so a snapshot from an
//! incompatible build is rejected as a whole instead of half-parsed.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A decoded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: T,
}

impl<T> Snapshot<T> {
    /// Wraps state at the current version, stamped now.
    pub fn new(state: T) -> Self {
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            state,
        }
    }
}

/// Envelope with the state left undecoded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    version: u32,
    saved_at: DateTime<Utc>,
    state: serde_json::Value,
}

/// Serializes state into an envelope string.
pub fn encode<T: Serialize>(key: &str, state: &T) -> StoreResult<String> {
    serde_json::to_string(&Snapshot::new(state)).map_err(|e| StoreError::serialization(key, e))
}

/// Parses an envelope string, rejecting foreign versions.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> StoreResult<Snapshot<T>> {
    let envelope: RawSnapshot =
        serde_json::from_str(raw).map_err(|e| StoreError::serialization(key, e))?;

    if envelope.version != SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            key: key.to_string(),
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let state = serde_json::from_value(envelope.state)
        .map_err(|e| StoreError::serialization(key, e))?;

    Ok(Snapshot {
        version: envelope.version,
        saved_at: envelope.saved_at,
        state,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::Theme;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: Theme,
    }

    #[test]
    fn test_encode_envelope_shape() {
        let raw = encode("theme-storage", &Prefs { theme: Theme::Dark }).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["version"], SNAPSHOT_VERSION);
        assert_eq!(json["state"]["theme"], "dark");
        assert!(json["savedAt"].is_string());
    }

    #[test]
    fn test_decode_current_version() {
        let raw = r#"{"version":1,"savedAt":"2024-03-01T12:00:00Z","state":{"theme":"dark"}}"#;
        let snapshot: Snapshot<Prefs> = decode("theme-storage", raw).unwrap();
        assert_eq!(snapshot.state, Prefs { theme: Theme::Dark });
        assert_eq!(snapshot.saved_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_decode_foreign_version() {
        let raw = r#"{"version":7,"savedAt":"2024-03-01T12:00:00Z","state":{"anything":true}}"#;
        let err = decode::<Prefs>("theme-storage", raw).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedVersion { found: 7, expected: 1, .. }
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode::<Prefs>("theme-storage", "not json"),
            Err(StoreError::Serialization { .. })
        ));

        // Valid envelope, wrong state shape
        let raw = r#"{"version":1,"savedAt":"2024-03-01T12:00:00Z","state":{"theme":"neon"}}"#;
        assert!(matches!(
            decode::<Prefs>("theme-storage", raw),
            Err(StoreError::Serialization { .. })
        ));
    }
}
