//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, Write};

use serde_json::Value;
use tabled::{Table, Tabled, builder::Builder, settings::Style};

use qbitctl_api::{Object, Payload};

use crate::cli::OutputFormat;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted string,
/// since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Render a decoded response of any shape.
///
/// Used where no typed row exists (`call`, preferences, properties):
/// object arrays become a table with one column per key, objects a
/// key/value table, scalars one per line.
pub fn render_payload(format: &OutputFormat, payload: &Payload) -> String {
    match format {
        OutputFormat::Json => render_json(payload, false),
        OutputFormat::JsonCompact => render_json(payload, true),
        OutputFormat::Yaml => render_yaml(payload),
        OutputFormat::Table | OutputFormat::Plain => {
            let table = *format == OutputFormat::Table;
            match payload {
                Payload::Empty => String::new(),
                Payload::Text(s) => s.clone(),
                Payload::Int(n) => n.to_string(),
                Payload::Bool(b) => b.to_string(),
                Payload::Object(map) if table => render_object(map),
                Payload::Objects(items) if table => render_objects(items),
                Payload::Object(map) => render_json(map, true),
                Payload::Objects(items) => items
                    .iter()
                    .map(|item| render_json(item, true))
                    .collect::<Vec<_>>()
                    .join("\n"),
                Payload::Scalars(items) => items.iter().map(cell).collect::<Vec<_>>().join("\n"),
            }
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

/// Rounded table of derived rows.
pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Two-column key/value table of an object.
pub fn render_object(map: &Object) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Key", "Value"]);
    for (key, value) in map {
        builder.push_record([key.clone(), cell(value)]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Table with one column per key, in order of first appearance.
pub fn render_objects(items: &[Object]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for item in items {
        for key in item.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().copied());
    for item in items {
        builder.push_record(
            columns
                .iter()
                .map(|col| item.get(*col).map(cell).unwrap_or_default()),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

/// A JSON value as a table cell: bare strings unquoted, nested values compact.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => render_json(value, true),
    }
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| serialization_failed(&e))
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).unwrap_or_else(|e| serialization_failed(&e))
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        render_json_compact(data)
    } else {
        render_json_pretty(data)
    }
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| serialization_failed(&e))
}

fn serialization_failed(err: &dyn std::fmt::Display) -> String {
    tracing::error!(error = %err, "failed to serialize output");
    String::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn objects_table_has_union_of_columns() {
        let items = vec![
            object(json!({"name": "ubuntu", "size": 10})),
            object(json!({"name": "debian", "ratio": 1.5})),
        ];
        let out = render_objects(&items);
        let header = out.lines().nth(1).unwrap();
        assert!(header.contains("name"));
        assert!(header.contains("size"));
        assert!(header.contains("ratio"));
        assert!(out.contains("debian"));
    }

    #[test]
    fn scalars_plain_is_one_per_line() {
        let payload = Payload::Scalars(vec![json!("linux"), json!("iso")]);
        assert_eq!(render_payload(&OutputFormat::Plain, &payload), "linux\niso");
    }

    #[test]
    fn bool_payload_renders_as_word() {
        assert_eq!(render_payload(&OutputFormat::Table, &Payload::Bool(true)), "true");
        assert_eq!(render_payload(&OutputFormat::Json, &Payload::Int(7)), "7");
    }

    #[test]
    fn nested_values_are_compact_json_cells() {
        assert_eq!(cell(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
        assert_eq!(cell(&json!("x")), "x");
        assert_eq!(cell(&Value::Null), "");
    }

    #[test]
    fn empty_payload_prints_nothing() {
        assert_eq!(render_payload(&OutputFormat::Table, &Payload::Empty), "");
    }
}
