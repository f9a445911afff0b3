//! Diff generation for audit logging
//!
//! Summarizes which top-level fields of an expense changed between two
//! serialized states.

use serde_json::Value;

const MAX_STRING_CHARS: usize = 50;

/// Generate a human-readable diff between two JSON values
///
/// Only top-level field changes are reported; expense records are flat.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Titles are often Vietnamese, so truncate on chars not bytes
            if s.chars().count() > MAX_STRING_CHARS {
                let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_change() {
        let before = json!({"title": "Cà phê", "amount": 25000});
        let after = json!({"title": "Cà phê", "amount": 30000});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("amount: 25000 -> 30000"));
        assert!(!diff.contains("title"));
    }

    #[test]
    fn test_category_cleared() {
        let before = json!({"category": "Ăn uống"});
        let after = json!({"category": null});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "category: \"Ăn uống\" -> null");
    }

    #[test]
    fn test_field_added_and_removed() {
        let before = json!({"a": 1});
        let after = json!({"b": 2});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("a: 1 -> (removed)"));
        assert!(diff.contains("b: (added) -> 2"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"title": "x", "paid": 1});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_long_multibyte_string_truncation() {
        let long_title = "Tiền điện ".repeat(10);
        let before = json!({"title": long_title});
        let after = json!({"title": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!("test")), "\"test\"");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
    }
}
