//! Key-value persistence substrate
//!
//! The expense store only needs three primitives from its backing storage:
//! read a string value, write a string value, and remove a set of keys.
//! Single-key writes are expected to be crash-atomic; there is no indexing or
//! querying.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::ExpenseError;

use super::file_io::{read_string, remove_if_exists, write_atomic};

/// Durable mapping from string keys to string values
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError>;

    /// Remove every key in `keys`; absent keys are ignored
    fn remove_all(&self, keys: &[&str]) -> Result<(), ExpenseError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        (**self).set(key, value)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), ExpenseError> {
        (**self).remove_all(keys)
    }
}

/// In-memory substrate
///
/// Clones share the same underlying map, so a clone handed to a fresh
/// `ExpenseStore` behaves like the same device after a process restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        for key in keys {
            data.remove(*key);
        }
        Ok(())
    }
}

/// File-backed substrate: one `<key>.json` file per key under a directory
///
/// Every write goes through the temp-file + fsync + rename path, so a crash
/// leaves either the old value or the new value on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ExpenseError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(ExpenseError::StorageUnavailable(format!(
                "Invalid storage key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        read_string(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        write_atomic(self.path_for(key)?, value.as_bytes())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), ExpenseError> {
        for key in keys {
            remove_if_exists(self.path_for(key)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("expenses").unwrap(), None);

        store.set("expenses", "[]").unwrap();
        store.set("initialized", "true").unwrap();
        assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[]"));

        store.set("expenses", "[1]").unwrap();
        assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[1]"));

        store.remove_all(&["expenses", "initialized", "never-set"]).unwrap();
        assert_eq!(store.get("expenses").unwrap(), None);
        assert_eq!(store.get("initialized").unwrap(), None);
    }

    #[test]
    fn test_memory_store_contract() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store_contract() {
        let temp_dir = TempDir::new().unwrap();
        exercise(&FileStore::new(temp_dir.path()));
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_file_store_layout() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));
        store.set("expenses", "[]").unwrap();
        assert!(temp_dir.path().join("data").join("expenses.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.set("", "x").is_err());
    }
}
