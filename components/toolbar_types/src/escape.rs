//! Output escaping
//!
//! Every harvested key and value passes through [`make_safe`] before it is
//! stored, so rendered views can emit snapshot strings without escaping them
//! again.

use serde_json::Value;

/// HTML-escape a string for embedding in markup or attributes
pub fn make_safe(text: &str) -> String {
    handlebars::html_escape(text)
}

/// Printable, escaped form of an arbitrary value
///
/// Strings are escaped as-is; everything else is pretty-printed first.
pub fn make_value_safe(value: &Value) -> String {
    match value {
        Value::String(s) => make_safe(s),
        other => make_safe(&printable(other)),
    }
}

/// Debug-style representation of a non-string value
pub fn printable(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}
