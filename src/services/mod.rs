//! Service layer for expense-notes
//!
//! Logic that sits beside the record store: parsing import payloads and
//! shaping snapshots for browsing.

pub mod import_source;
pub mod query;

pub use import_source::{items_from_value, parse_import_payload, read_import_file};
pub use query::{sort_newest_first, ExpenseFilter, ExpenseSummary};
