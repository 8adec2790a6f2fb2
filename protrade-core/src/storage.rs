//! Storage port
//!
//! The persistence seam of the platform: keyed string blobs behind a
//! small trait, so every component receives an explicitly injected
//! backend and tests can run against the in-memory double.

use crate::error::{ErrorContext, ProTradeError, ProTradeResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Keyed blob storage port
pub trait KeyValueStore: Send + Sync {
    /// Return the blob stored under `key`, if any
    fn get(&self, key: &str) -> ProTradeResult<Option<String>>;

    /// Store `value` under `key`, overwriting prior content
    fn set(&self, key: &str, value: &str) -> ProTradeResult<()>;

    /// Remove the blob stored under `key`; removing a missing key is not
    /// an error
    fn remove(&self, key: &str) -> ProTradeResult<()>;
}

/// In-memory store, used as the default backend and as the test double
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ProTradeResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ProTradeResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ProTradeResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON file per key under a data directory
pub struct JsonFileStore {
    storage_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a new file store, creating the directory if needed
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> ProTradeResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir).map_err(|e| ProTradeError::Storage {
            message: format!("Failed to create storage directory: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("storage")
                .with_operation("create_dir")
                .with_suggestion("Check that the data directory is writable"),
        })?;

        debug!("File storage initialized at: {}", storage_dir.display());
        Ok(Self { storage_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> ProTradeResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = std::fs::read_to_string(&path).map_err(|e| ProTradeError::Storage {
            message: format!("Failed to read {}: {}", path.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("storage").with_operation("get"),
        })?;

        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> ProTradeResult<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| ProTradeError::Storage {
            message: format!("Failed to write {}: {}", path.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("storage").with_operation("set"),
        })?;

        debug!("Stored {} bytes under key: {}", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> ProTradeResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| ProTradeError::Storage {
                message: format!("Failed to remove {}: {}", path.display(), e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("storage").with_operation("remove"),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing").unwrap(), None);

        store.set("users", r#"[{"id":1}]"#).unwrap();
        assert_eq!(store.get("users").unwrap().unwrap(), r#"[{"id":1}]"#);

        store.set("users", "[]").unwrap();
        assert_eq!(store.get("users").unwrap().unwrap(), "[]");

        store.remove("users").unwrap();
        assert_eq!(store.get("users").unwrap(), None);

        // Removing a missing key is not an error
        store.remove("users").unwrap();
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "abc-123").unwrap();
        assert_eq!(store.get("token").unwrap().unwrap(), "abc-123");

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = JsonFileStore::new(dir.path()).unwrap();
            store.set("users", "[]").unwrap();
        }

        let reopened = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(reopened.get("users").unwrap().unwrap(), "[]");
    }
}
