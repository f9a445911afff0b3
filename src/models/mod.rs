//! Core data models for expense-notes
//!
//! This module contains the data structures persisted by the record store:
//! expense records, their ids and amounts, and raw import items.

pub mod amount;
pub mod expense;
pub mod ids;
pub mod import_item;

pub use amount::{Amount, AmountParseError};
pub use expense::{Expense, ExpenseValidationError, PaidStatus};
pub use ids::ExpenseId;
pub use import_item::ImportItem;
