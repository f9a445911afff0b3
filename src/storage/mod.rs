//! Storage layer for expense-notes
//!
//! A key-value persistence substrate (in memory or JSON files with atomic
//! writes) and the expense store that keeps the whole collection on top of it.

pub mod expenses;
pub mod file_io;
pub mod kv;
pub mod seed;

pub use expenses::{ExpenseStore, ImportReport, EXPENSES_KEY, INITIALIZED_KEY};
pub use file_io::{read_json, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use seed::sample_expenses;

use crate::audit::AuditLogger;
use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::error::ExpenseError;

/// Build the on-disk store described by `paths` and `settings`
///
/// The store is returned unopened.
pub fn open_file_store(
    paths: &ExpensePaths,
    settings: &Settings,
) -> Result<ExpenseStore<FileStore>, ExpenseError> {
    paths.ensure_directories()?;

    let store = ExpenseStore::new(FileStore::new(paths.data_dir()));
    Ok(if settings.audit_enabled {
        store.with_audit(AuditLogger::new(paths.audit_log()))
    } else {
        store
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_file_store(&paths, &Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!store.is_open());

        store.open().unwrap();
        store.seed().unwrap();
        assert!(paths.data_dir().join("expenses.json").exists());
        assert!(paths.data_dir().join("initialized.json").exists());
        assert!(paths.audit_log().exists());
    }

    #[test]
    fn test_audit_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };

        let store = open_file_store(&paths, &settings).unwrap();
        store.open().unwrap();
        store.seed().unwrap();
        assert!(!paths.audit_log().exists());
    }
}
