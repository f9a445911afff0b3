//! Strongly-typed record identifier
//!
//! Expense ids are store-assigned sequential integers. Wrapping them keeps
//! them from being confused with amounts or timestamps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an expense record, unique within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// The id handed out when the collection is empty
    pub const FIRST: ExpenseId = ExpenseId(1);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }

    /// The id directly after this one, or `None` past `i64::MAX`
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Next id to assign for a collection: `max + 1`, or `1` when empty
    ///
    /// `None` when the maximum is already `i64::MAX`.
    pub fn next_after<I>(ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = ExpenseId>,
    {
        match ids.into_iter().max() {
            Some(max) => max.next(),
            None => Some(Self::FIRST),
        }
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for ExpenseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ExpenseId::new(7).to_string(), "#7");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("7".parse::<ExpenseId>().unwrap(), ExpenseId::new(7));
        assert_eq!("#12".parse::<ExpenseId>().unwrap(), ExpenseId::new(12));
        assert!("abc".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_next_after_empty_is_first() {
        assert_eq!(ExpenseId::next_after(Vec::new()), Some(ExpenseId::FIRST));
    }

    #[test]
    fn test_next_after_uses_max_not_count() {
        let ids = vec![ExpenseId::new(3), ExpenseId::new(10), ExpenseId::new(4)];
        assert_eq!(ExpenseId::next_after(ids), Some(ExpenseId::new(11)));
    }

    #[test]
    fn test_next_stops_at_max() {
        assert_eq!(ExpenseId::new(i64::MAX).next(), None);
        assert_eq!(ExpenseId::next_after(vec![ExpenseId::new(i64::MAX)]), None);
        assert_eq!(
            ExpenseId::new(i64::MAX - 1).next(),
            Some(ExpenseId::new(i64::MAX))
        );
    }

    #[test]
    fn test_id_serialization() {
        let json = serde_json::to_string(&ExpenseId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExpenseId::new(5));
    }
}
