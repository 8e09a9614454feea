pub mod csv_out;
pub mod display;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io::{self, Write};

/// Dispatch output to the appropriate formatter on stdout.
pub fn format_output(format: &OutputFormat, value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_output(&mut stdout.lock(), format, value) {
        eprintln!("Output error: {}", e);
    }
}

/// Same dispatch, into any writer.
pub fn write_output<W: Write>(out: &mut W, format: &OutputFormat, value: &Value) -> io::Result<()> {
    match format {
        OutputFormat::Json => json::write_json(out, value),
        OutputFormat::Table => table::write_table(out, value),
        OutputFormat::Csv => csv_out::write_csv(out, value),
        OutputFormat::Minimal => minimal::write_minimal(out, value),
    }
}

/// The rows a formatter should lay out: the `result` array of a summary, or
/// the `assets` of a selection.
pub(crate) fn result_rows(value: &Value) -> Option<&Vec<Value>> {
    let result = value.as_object().and_then(|m| m.get("result")).unwrap_or(value);
    match result {
        Value::Array(rows) => Some(rows),
        Value::Object(map) => map.get("assets").and_then(Value::as_array),
        _ => None,
    }
}
