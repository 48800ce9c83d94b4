//! Generic JSON-to-XML transform

use serde_json::{Map, Value};

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Render `value` as an XML document rooted at `<response>`
///
/// Object keys become element names, array items become `item<index>`
/// elements, and `null` becomes an empty element.
pub fn to_xml(value: &Value) -> String {
    let mut out = String::from(DECLARATION);
    out.push_str("<response>");
    write_content(&mut out, value);
    out.push_str("</response>\n");
    out
}

/// Element name for a JSON object key
///
/// Numeric keys get an `item` prefix and characters that cannot appear in
/// an XML name are replaced with `_`.
pub fn element_name(key: &str) -> String {
    if key.is_empty() {
        return "item".to_string();
    }

    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => name.insert_str(0, "item"),
        Some('-') | Some('.') => name.insert(0, '_'),
        _ => {}
    }
    name
}

fn write_content(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => write_object(out, map),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                write_element(out, &format!("item{}", index), item);
            }
        }
        scalar => out.push_str(&escape_text(&scalar_text(scalar))),
    }
}

fn write_object(out: &mut String, map: &Map<String, Value>) {
    for (key, value) in map {
        write_element(out, &element_name(key), value);
    }
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    if value.is_null() {
        out.push_str(&format!("<{}/>", name));
        return;
    }
    out.push_str(&format!("<{}>", name));
    write_content(out, value);
    out.push_str(&format!("</{}>", name));
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
