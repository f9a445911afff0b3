//! Custom error types for expense-notes
//!
//! This module defines the error hierarchy for the record store using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense-notes operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// The persistence substrate could not be read, written, or decoded
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A store operation was attempted before `open()`
    #[error("Expense store is not initialized; call open() first")]
    NotInitialized,

    /// Import payload shape was not recognized
    #[error("Malformed import source: {0}")]
    MalformedImportSource(String),

    /// Validation errors for records
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the persistence substrate
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense-notes operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::StorageUnavailable("disk gone".into());
        assert_eq!(err.to_string(), "Storage unavailable: disk gone");
        assert!(err.is_storage());
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("#42");
        assert_eq!(err.to_string(), "Expense not found: #42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_initialized_display() {
        let err = ExpenseError::NotInitialized;
        assert!(err.to_string().contains("open()"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
