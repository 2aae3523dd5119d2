//! Keyed JSON persistence for the dashboard collections
//!
//! Each collection is stored independently under its own key. A
//! malformed payload is never fatal: it is logged and treated as
//! absent, which triggers the seed-data fallback upstream.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Storage keys for the four persisted collections.
pub const DOCUMENTS_KEY: &str = "documents";
pub const DEADLINES_KEY: &str = "deadlines";
pub const ACTIVITY_KEY: &str = "activity";
pub const LAYOUT_KEY: &str = "layout";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to write collection {key:?}: {source}")]
    Write {
        key: String,
        source: io::Error,
    },

    #[error("failed to serialize collection {key:?}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to open data directory {dir}: {source}")]
    DataDir { dir: String, source: io::Error },
}

/// Durable key-value persistence for serialized collections.
pub trait Storage {
    /// Load a collection. Absent and malformed payloads both yield
    /// `None`; malformed payloads are logged.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T>;

    /// Save a collection. Serialization failures surface as errors so
    /// callers can log a diagnostic; they never panic.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError>;
}

/// One pretty-printed JSON file per key under a data directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open the default platform data directory, `<data_dir>/legal-eagle`.
    pub fn new() -> Result<Self, StoreError> {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("legal-eagle");
        Self::at(dir)
    }

    /// Open a specific data directory, creating it if needed.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
            dir: dir.display().to_string(),
            source,
        })?;
        info!(dir = %dir.display(), "opened dashboard data directory");
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, "failed to read stored collection: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "stored collection is malformed, treating as absent: {e}");
                None
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        fs::write(self.path(key), json).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// In-memory backend for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a raw payload under a key, bypassing serialization. Lets
    /// tests simulate corrupt stored state.
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), raw.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }
}

impl Storage for MemoryStorage {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.lock().expect("storage lock poisoned");
        let raw = entries.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "stored collection is malformed, treating as absent: {e}");
                None
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::at(dir.path()).unwrap();
        let value = vec!["a".to_string(), "b".to_string()];
        storage.save(LAYOUT_KEY, &value).unwrap();
        let back: Vec<String> = storage.load(LAYOUT_KEY).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_absent_key_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::at(dir.path()).unwrap();
        assert_eq!(storage.load::<Vec<String>>("missing"), None);
    }

    #[test]
    fn test_malformed_payload_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::at(dir.path()).unwrap();
        fs::write(dir.path().join("documents.json"), "{ not json").unwrap();
        assert_eq!(storage.load::<Vec<String>>(DOCUMENTS_KEY), None);
    }

    #[test]
    fn test_memory_storage_corruption_simulation() {
        let storage = MemoryStorage::new();
        storage.insert_raw(DEADLINES_KEY, "[[[[");
        assert_eq!(storage.load::<Vec<String>>(DEADLINES_KEY), None);
        storage.save(DEADLINES_KEY, &vec![1, 2, 3]).unwrap();
        assert_eq!(storage.load::<Vec<i32>>(DEADLINES_KEY), Some(vec![1, 2, 3]));
    }
}
