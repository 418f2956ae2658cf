//! The mirror contract: durable string-keyed JSON storage.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage backend errors.
///
/// `load` never returns these; a value that cannot be read or parsed is
/// treated as absent so callers can fall back to a default.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable key-value store holding JSON text.
///
/// Implementations must be usable behind `Arc<dyn Mirror>`; the typed
/// save/load convenience lives on [`MirrorExt`].
pub trait Mirror: Send + Sync {
    /// Store `json` durably under `key`, replacing any previous value.
    fn save_raw(&self, key: &str, json: &str) -> Result<(), StorageError>;

    /// Return the stored text for `key`, or `None` if absent or unreadable.
    fn load_raw(&self, key: &str) -> Option<String>;

    /// Delete the entry for `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed serialization layer over [`Mirror`].
pub trait MirrorExt: Mirror {
    /// Serialize `value` to JSON and store it under `key`.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.save_raw(key, &json)
    }

    /// Load and deserialize the value under `key`.
    ///
    /// Returns `None` when the key is missing or its content does not parse
    /// as `T`; parse failures are logged and swallowed so callers degrade to
    /// their default state.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.load_raw(key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Malformed persisted value for key {:?}: {}", key, e);
                None
            }
        }
    }
}

impl<M: Mirror + ?Sized> MirrorExt for M {}

/// Validate that a key is safe to use as a storage name.
///
/// Keys double as file names in the file-backed mirror, so they are limited
/// to ASCII alphanumerics, `_` and `-`.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::MemoryMirror;

    #[test]
    fn test_valid_keys() {
        assert!(validate_key("tasks").is_ok());
        assert!(validate_key("isAuthenticated").is_ok());
        assert!(validate_key("weather_cache-v2").is_ok());
    }

    #[test]
    fn test_invalid_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("with space").is_err());
        assert!(validate_key("with/slash").is_err());
    }

    #[test]
    fn test_typed_round_trip() {
        let mirror = MemoryMirror::default();
        mirror.save("count", &42u32).unwrap();
        assert_eq!(mirror.load::<u32>("count"), Some(42));
    }

    #[test]
    fn test_malformed_value_loads_as_none() {
        let mirror = MemoryMirror::default();
        mirror.save_raw("tasks", "{not valid json").unwrap();
        assert_eq!(mirror.load::<Vec<u32>>("tasks"), None);
    }

    #[test]
    fn test_wrong_shape_loads_as_none() {
        let mirror = MemoryMirror::default();
        mirror.save("tasks", &"a plain string").unwrap();
        assert_eq!(mirror.load::<Vec<u32>>("tasks"), None);
    }

    #[test]
    fn test_missing_key_loads_as_none() {
        let mirror = MemoryMirror::default();
        assert_eq!(mirror.load::<u32>("absent"), None);
    }
}
