//! Display formatting utilities
//!
//! Plain-text rendering used by the CLI.

pub mod expense;

pub use expense::{
    format_expense_details, format_expense_list, format_expense_row, format_import_report,
    format_summary,
};
