//! Import payload parsing
//!
//! An import source delivers either `{ "products": [ ... ] }` or a bare array
//! of items shaped `{ title, price, category? }`. Anything else rejects the
//! whole batch with `MalformedImportSource`.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ImportItem;

/// Key wrapping the item list in object-shaped payloads
pub const PRODUCTS_KEY: &str = "products";

/// Parse a raw JSON payload into import items
pub fn parse_import_payload(raw: &str) -> ExpenseResult<Vec<ImportItem>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ExpenseError::MalformedImportSource(format!("invalid JSON: {}", e)))?;
    items_from_value(value)
}

/// Extract import items from an already-decoded payload
pub fn items_from_value(value: Value) -> ExpenseResult<Vec<ImportItem>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove(PRODUCTS_KEY) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ExpenseError::MalformedImportSource(format!(
                    "'{}' is not an array",
                    PRODUCTS_KEY
                )))
            }
            None => {
                return Err(ExpenseError::MalformedImportSource(format!(
                    "object payload has no '{}' array",
                    PRODUCTS_KEY
                )))
            }
        },
        other => {
            return Err(ExpenseError::MalformedImportSource(format!(
                "expected an array or an object, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<ImportItem>(item).map_err(|e| {
                ExpenseError::MalformedImportSource(format!("item {}: {}", index, e))
            })
        })
        .collect()
}

/// Read a payload from a file, or from stdin when `path` is `-`
pub fn read_import_file(path: &Path) -> ExpenseResult<Vec<ImportItem>> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ExpenseError::Io(format!("Failed to read stdin: {}", e)))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            ExpenseError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?
    };

    parse_import_payload(&raw)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
