use std::path::Path;

use custom_kw_api::{ParsedRecord, Schema};

use crate::error::EngineError;

/// Substitute the first `%d` in a file pattern with the realization index.
/// Patterns without `%d` are returned unchanged.
pub fn render_pattern(pattern: &str, iens: usize) -> String {
    pattern.replacen("%d", &iens.to_string(), 1)
}

/// Render a record in the `key value` line format, in schema order.
/// Empty slots are skipped, so the output parses back into the same record.
pub fn format_record(schema: &Schema, record: &ParsedRecord) -> String {
    let mut out = String::new();
    for (key, value) in record.entries(schema) {
        if let Some(value) = value {
            out.push_str(key);
            out.push(' ');
            out.push_str(&value.to_string());
            out.push('\n');
        }
    }
    out
}

/// Write `record` to `path` in the `key value` line format.
pub fn write_output_file(
    path: impl AsRef<Path>,
    schema: &Schema,
    record: &ParsedRecord,
) -> Result<(), EngineError> {
    let path = path.as_ref();
    std::fs::write(path, format_record(schema, record)).map_err(|e| EngineError::io(path, e))?;
    tracing::debug!(path = %path.display(), keys = schema.len(), "wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use custom_kw_api::{Value, ValueType};

    #[test]
    fn renders_first_placeholder_only() {
        assert_eq!(render_pattern("res_%d.txt", 7), "res_7.txt");
        assert_eq!(render_pattern("a%d/b%d", 1), "a1/b%d");
        assert_eq!(render_pattern("plain.txt", 4), "plain.txt");
    }

    #[test]
    fn format_skips_empty_slots() {
        let schema = Schema::fixed([
            ("pressure", ValueType::Float),
            ("unset", ValueType::Float),
            ("label", ValueType::Text),
        ])
        .unwrap();
        let record = ParsedRecord(vec![
            Some(Value::Float(12.5)),
            None,
            Some(Value::Text("hello".into())),
        ]);

        assert_eq!(format_record(&schema, &record), "pressure 12.5\nlabel hello\n");
    }

    #[test]
    fn output_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let schema = Schema::fixed([("x", ValueType::Float)]).unwrap();
        let record = ParsedRecord(vec![Some(Value::Float(-1.0))]);

        write_output_file(&path, &schema, &record).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x -1\n");
    }
}
