use serde_json::Value;
use std::io::{self, Write};

use super::result_rows;

/// Print just the key answer: the asset codes of a summary or selection,
/// otherwise the first field of the result.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", minimal_line(value))
}

fn minimal_line(value: &Value) -> String {
    if let Some(rows) = result_rows(value) {
        let codes: Vec<String> = rows
            .iter()
            .filter_map(|r| r.get("asset"))
            .map(format_minimal)
            .collect();
        if !codes.is_empty() {
            return codes.join(",");
        }
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
