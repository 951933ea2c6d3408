//! Output rendering
//!
//! Every command produces a `serde_json::Value`, rendered as JSON, YAML
//! or a table. Table mode handles the two shapes commands actually emit:
//! an array of objects becomes rows with union-of-keys columns, and a
//! single object becomes a field/value listing.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Render a value to stdout in the requested format.
pub fn print_output(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(value)?);
        }
        OutputFormat::Table => {
            println!("{}", render_table(value));
        }
    }
    Ok(())
}

fn render_table(value: &Value) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    match value {
        Value::Array(items) => {
            let columns = collect_columns(items);
            table.set_header(columns.iter().map(|c| Cell::new(c)));
            for item in items {
                table.add_row(columns.iter().map(|col| {
                    Cell::new(format_value(item.get(col.as_str()).unwrap_or(&Value::Null)))
                }));
            }
        }
        Value::Object(map) => {
            table.set_header(vec![Cell::new("FIELD"), Cell::new("VALUE")]);
            for (key, val) in map {
                table.add_row(vec![Cell::new(key), Cell::new(format_value(val))]);
            }
        }
        other => {
            table.add_row(vec![Cell::new(format_value(other))]);
        }
    }
    table
}

/// Union of keys across all array elements, in first-seen order.
fn collect_columns(items: &[Value]) -> Vec<String> {
    let mut columns = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // keep nested structures readable inside one cell
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}
