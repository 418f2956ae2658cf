//! In-memory mirror, used by tests and as a throwaway backend.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::mirror::{validate_key, Mirror, StorageError};

/// Mirror backed by a plain map. Durable only for the process lifetime.
///
/// Tests use `save_raw` directly to plant malformed JSON and observe the
/// soft-fail behavior of `load`.
#[derive(Debug, Default)]
pub struct MemoryMirror {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Mirror for MemoryMirror {
    fn save_raw(&self, key: &str, json: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.lock().insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.lock().remove(key);
        Ok(())
    }
}
