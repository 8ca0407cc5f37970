//! Field deserializers for backend rows.
//!
//! The backend is loose about types: years arrive as numbers or numeric
//! strings, amounts as strings or floats, and any field may be null. Each
//! helper maps whatever it cannot use to `None` or empty rather than failing
//! the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String, number or null. Blank strings become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Integer, numeric string or null.
pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Array of strings, or null. Non-string entries are skipped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Boolean-as-string flag: `"Yes"`, `"Y"`, `"true"`, `"1"`, `true` or `1`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "1"
        ),
        _ => false,
    })
}

/// Format a monetary amount for display. Unparseable amounts pass through.
pub fn format_amount(raw: Option<&str>) -> String {
    match raw {
        None => "$0.00".to_string(),
        Some(s) => match s.trim_start_matches('$').replace(',', "").parse::<f64>() {
            Ok(value) => format!("${value:.2}"),
            Err(_) => s.to_string(),
        },
    }
}
