//! File-backed mirror: one JSON file per key under the data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::mirror::{validate_key, Mirror, StorageError};

/// Durable mirror storing each key as `<data_dir>/<key>.json`.
///
/// Writes are synchronous; a mutation and its mirrored write are never
/// separated by an intervening read of the same key.
#[derive(Debug)]
pub struct FileMirror {
    data_dir: PathBuf,
}

impl FileMirror {
    /// Create a mirror rooted at `data_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl Mirror for FileMirror {
    fn save_raw(&self, key: &str, json: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        fs::write(&path, json)?;
        tracing::debug!("Persisted key {:?} at {:?}", key, path);
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key).ok()?;
        match fs::read_to_string(&path) {
            Ok(json) => Some(json),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read key {:?} from {:?}: {}", key, path, e);
                None
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed key {:?}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
