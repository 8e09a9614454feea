use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use super::result_rows;

/// Format output as tables using the tabled crate: one row per asset, then
/// any scalar result fields, warnings and methodology.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    if let Some(rows) = result_rows(value) {
        write_array_table(out, rows)?;
    }

    let Value::Object(envelope) = value else {
        return writeln!(out, "{}", value);
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => write_fields(out, result)?,
        Some(_) => {}
        None => write_fields(out, envelope)?,
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings {
                if let Value::String(s) = w {
                    writeln!(out, "  - {}", s)?;
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }
    Ok(())
}

fn write_fields<W: Write>(out: &mut W, map: &Map<String, Value>) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut any = false;
    for (key, val) in map {
        if val.is_array() {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
        any = true;
    }
    if any {
        writeln!(out, "{}", Table::from(builder))?;
    }
    Ok(())
}

fn write_array_table<W: Write>(out: &mut W, arr: &[Value]) -> io::Result<()> {
    if arr.is_empty() {
        return writeln!(out, "(empty)");
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        writeln!(out, "{}", Table::from(builder))?;
    } else {
        for item in arr {
            writeln!(out, "{}", format_value(item))?;
        }
    }
    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
