//! Expense model
//!
//! Represents a single recorded expense. The serialized form is the exact
//! shape persisted in the collection blob:
//! `{ id, title, amount, category, paid: 0|1, created_at }`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::amount::Amount;
use super::ids::ExpenseId;

/// Whether an expense has been paid
///
/// Persisted as the integers `1` / `0`. Booleans are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaidStatus {
    /// Money already spent; the default for manually entered expenses
    #[default]
    Paid,
    /// Still owed; the default for imported expenses
    Unpaid,
}

impl PaidStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// The opposite status
    pub fn toggled(&self) -> Self {
        match self {
            Self::Paid => Self::Unpaid,
            Self::Unpaid => Self::Paid,
        }
    }

    pub fn as_flag(&self) -> u8 {
        match self {
            Self::Paid => 1,
            Self::Unpaid => 0,
        }
    }
}

impl fmt::Display for PaidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Unpaid => write!(f, "Unpaid"),
        }
    }
}

impl Serialize for PaidStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_flag())
    }
}

impl<'de> Deserialize<'de> for PaidStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFlag {
            Int(i64),
            Bool(bool),
        }

        match RawFlag::deserialize(deserializer)? {
            RawFlag::Int(1) | RawFlag::Bool(true) => Ok(Self::Paid),
            RawFlag::Int(0) | RawFlag::Bool(false) => Ok(Self::Unpaid),
            RawFlag::Int(other) => Err(serde::de::Error::custom(format!(
                "paid flag must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub title: String,

    /// How much was spent (positive)
    pub amount: Amount,

    /// Optional free-form category
    #[serde(default)]
    pub category: Option<String>,

    /// Paid flag
    pub paid: PaidStatus,

    /// Creation time in epoch milliseconds, never changed afterwards
    pub created_at: i64,
}

impl Expense {
    /// Build a manually entered expense, which starts out paid
    pub fn manual(
        id: ExpenseId,
        title: impl Into<String>,
        amount: Amount,
        category: Option<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            amount,
            category: normalize_category(category),
            paid: PaidStatus::Paid,
            created_at,
        }
    }

    /// Build an imported expense, which starts out unpaid
    pub fn imported(
        id: ExpenseId,
        title: impl Into<String>,
        amount: Amount,
        category: Option<String>,
        created_at: i64,
    ) -> Self {
        Self {
            paid: PaidStatus::Unpaid,
            ..Self::manual(id, title, amount, category, created_at)
        }
    }

    /// Replace the editable fields, keeping id, paid flag and creation time
    pub fn apply_edit(&mut self, title: impl Into<String>, amount: Amount, category: Option<String>) {
        self.title = title.into();
        self.amount = amount;
        self.category = normalize_category(category);
    }

    pub fn is_paid(&self) -> bool {
        self.paid.is_paid()
    }

    /// Creation time as a UTC datetime
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }

    /// Validate the record's caller-supplied fields
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.title, self.amount)
    }
}

/// Check a title/amount pair before it reaches the store
pub fn validate_fields(title: &str, amount: Amount) -> Result<(), ExpenseValidationError> {
    if title.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyTitle);
    }
    if !amount.is_valid() {
        return Err(ExpenseValidationError::InvalidAmount(amount.value()));
    }
    Ok(())
}

/// Empty or whitespace-only categories are stored as absent
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category.and_then(|c| {
        let trimmed = c.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == c.len() {
            Some(c)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    InvalidAmount(f64),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::InvalidAmount(v) => write!(f, "Expense amount must be greater than zero, got {}", v),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
