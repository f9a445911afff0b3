//! CLI command handler for bulk import
//!
//! Reads a JSON payload (`{"products": [...]}` or a bare array) from a file or
//! stdin and imports it with title deduplication.

use std::path::Path;

use crate::display::format_import_report;
use crate::error::ExpenseResult;
use crate::services::read_import_file;
use crate::storage::{ExpenseStore, KeyValueStore};

/// Handle the import command
pub fn handle_import_command<S: KeyValueStore>(
    store: &ExpenseStore<S>,
    file: &str,
) -> ExpenseResult<()> {
    let items = read_import_file(Path::new(file))?;

    if items.is_empty() {
        println!("No items found in import source.");
        return Ok(());
    }

    let total = items.len();
    let report = store.import_items(items)?;

    println!("{} (from {} item(s))", format_import_report(&report), total);
    if let (Some(first), Some(last)) = (report.imported_ids.first(), report.imported_ids.last()) {
        println!("New expenses {}..{} start out unpaid.", first, last);
    }

    Ok(())
}
