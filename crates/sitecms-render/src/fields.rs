//! Defensive lookups into schema-less site documents.

use serde_json::Value;

/// Non-empty string at `path`, if every step exists and has the right type.
pub fn string_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    value_at(value, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub fn value_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

/// Strings at `path`, accepting either a single string or an array of them.
pub fn strings_at<'a>(value: &'a Value, path: &[&str]) -> Vec<&'a str> {
    match value_at(value, path) {
        Some(Value::String(s)) if !s.is_empty() => vec![s.as_str()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
