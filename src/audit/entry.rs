//! Audit entry data structures
//!
//! Defines the operations recorded for the expense store and the entry
//! format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId};

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was entered manually
    Create,
    /// Title, amount or category was edited
    Update,
    /// Expense was deleted
    Delete,
    /// Paid flag was flipped
    Toggle,
    /// Batch of records imported from an external source
    Import,
    /// Sample records inserted into an empty store
    Seed,
    /// Store wiped and returned to its uninitialized state
    Reset,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Toggle => "TOGGLE",
            Operation::Import => "IMPORT",
            Operation::Seed => "SEED",
            Operation::Reset => "RESET",
        };
        f.write_str(label)
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Affected record; absent for whole-store operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<ExpenseId>,

    /// Human-readable description (record title, or batch summary)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Serialized record before the operation (updates, toggles, deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Serialized record after the operation (creates, updates, toggles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn blank(operation: Operation) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_id: None,
            entity_name: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a manually created expense
    pub fn create(expense: &Expense) -> Self {
        Self {
            entity_id: Some(expense.id),
            entity_name: Some(expense.title.clone()),
            after: serde_json::to_value(expense).ok(),
            ..Self::blank(Operation::Create)
        }
    }

    /// Entry for an edit; the diff is computed from the two states
    pub fn update(before: &Expense, after: &Expense) -> Self {
        Self::changed(Operation::Update, before, after)
    }

    /// Entry for a paid-flag flip
    pub fn toggle(before: &Expense, after: &Expense) -> Self {
        Self::changed(Operation::Toggle, before, after)
    }

    fn changed(operation: Operation, before: &Expense, after: &Expense) -> Self {
        let before_json = serde_json::to_value(before).ok();
        let after_json = serde_json::to_value(after).ok();
        let diff_summary = match (&before_json, &after_json) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            entity_id: Some(after.id),
            entity_name: Some(after.title.clone()),
            before: before_json,
            after: after_json,
            diff_summary,
            ..Self::blank(operation)
        }
    }

    /// Entry for a deleted expense
    pub fn delete(expense: &Expense) -> Self {
        Self {
            entity_id: Some(expense.id),
            entity_name: Some(expense.title.clone()),
            before: serde_json::to_value(expense).ok(),
            ..Self::blank(Operation::Delete)
        }
    }

    /// Entry for a whole-store operation (import, seed, reset)
    pub fn batch(operation: Operation, summary: impl Into<String>) -> Self {
        Self {
            entity_name: Some(summary.into()),
            ..Self::blank(operation)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
        );

        if let Some(id) = self.entity_id {
            output.push_str(&format!(" {}", id));
        }

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    fn sample() -> Expense {
        Expense::manual(
            ExpenseId::new(4),
            "Cà phê",
            Amount::new(25000.0),
            Some("Ăn uống".into()),
            1_700_000_000_000,
        )
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Toggle.to_string(), "TOGGLE");
        assert_eq!(Operation::Import.to_string(), "IMPORT");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(&sample());

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_id, Some(ExpenseId::new(4)));
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["paid"], 1);
    }

    #[test]
    fn test_toggle_entry_has_diff() {
        let before = sample();
        let mut after = before.clone();
        after.paid = after.paid.toggled();

        let entry = AuditEntry::toggle(&before, &after);
        assert_eq!(entry.operation, Operation::Toggle);
        assert_eq!(entry.diff_summary.as_deref(), Some("paid: 1 -> 0"));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&sample());

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_batch_entry_serialization_omits_empty_fields() {
        let entry = AuditEntry::batch(Operation::Import, "2 imported, 1 duplicate");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"import\""));
        assert!(!json.contains("entity_id"));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.operation, Operation::Import);
    }

    #[test]
    fn test_human_readable_format() {
        let formatted = AuditEntry::create(&sample()).format_human_readable();
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains("#4"));
        assert!(formatted.contains("Cà phê"));
    }
}
