use crate::flatten::types::TabularResult;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::io::Write;

/// Writes a flattened table as CSV.
///
/// Cells are rendered as: null as an empty field, booleans as
/// `true`/`false`, numbers as their JSON text, strings verbatim. A field
/// is quoted when it contains the delimiter, a quote, or a line break;
/// embedded quotes are doubled.
pub struct CsvWriter<W: Write> {
    writer: W,
    delimiter: char,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_delimiter(writer, ',')
    }

    pub fn with_delimiter(writer: W, delimiter: char) -> Self {
        CsvWriter { writer, delimiter }
    }

    /// Write the header line followed by one line per row
    pub fn write_table(&mut self, table: &TabularResult) -> Result<()> {
        self.write_line(table.columns.iter().map(String::as_str))
            .context("Failed to write header")?;

        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(render_cell).collect();
            self.write_line(cells.iter().map(String::as_str))
                .context("Failed to write row")?;
        }

        Ok(())
    }

    fn write_line<'a>(&mut self, fields: impl Iterator<Item = &'a str>) -> Result<()> {
        let line: Vec<String> = fields
            .map(|field| escape_field(field, self.delimiter))
            .collect();
        writeln!(self.writer, "{}", line.join(&self.delimiter.to_string()))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

/// Writes a flattened table as newline-delimited JSON, one object per row.
///
/// Rows are rebuilt against the full column list, so every object carries
/// the same keys and absent values appear as explicit nulls.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesWriter { writer }
    }

    pub fn write_table(&mut self, table: &TabularResult) -> Result<()> {
        for row in &table.rows {
            let mut object = Map::new();
            for (column, cell) in table.columns.iter().zip(row) {
                object.insert(column.clone(), cell.clone());
            }

            let json = serde_json::to_string(&object).context("Failed to serialize row")?;
            writeln!(self.writer, "{}", json).context("Failed to write row")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

fn render_cell(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table() -> TabularResult {
        TabularResult {
            columns: vec!["id".to_string(), "note".to_string(), "flag".to_string()],
            rows: vec![
                vec![json!(1), json!("plain"), json!(true)],
                vec![json!(2), json!("has, comma"), Value::Null],
                vec![json!(3), json!("say \"hi\""), json!(false)],
            ],
            nested_fields_removed: 0,
        }
    }

    #[test]
    fn test_csv_output() {
        let mut buffer = Vec::new();
        let mut writer = CsvWriter::new(&mut buffer);
        writer.write_table(&sample_table()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "id,note,flag");
        assert_eq!(lines[1], "1,plain,true");
        assert_eq!(lines[2], "2,\"has, comma\",");
        assert_eq!(lines[3], "3,\"say \"\"hi\"\"\",false");
    }

    #[test]
    fn test_csv_custom_delimiter() {
        let table = TabularResult {
            columns: vec!["a".to_string(), "b".to_string()],
            rows: vec![vec![json!("x;y"), json!(2)]],
            nested_fields_removed: 0,
        };

        let mut buffer = Vec::new();
        let mut writer = CsvWriter::with_delimiter(&mut buffer, ';');
        writer.write_table(&table).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "a;b\n\"x;y\";2\n");
    }

    #[test]
    fn test_csv_quotes_line_breaks() {
        assert_eq!(escape_field("two\nlines", ','), "\"two\nlines\"");
        assert_eq!(escape_field("plain", ','), "plain");
    }

    #[test]
    fn test_jsonl_output() {
        let mut buffer = Vec::new();
        let mut writer = JsonLinesWriter::new(&mut buffer);
        writer.write_table(&sample_table()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], r#"{"id":1,"note":"plain","flag":true}"#);
        // Missing values come through as explicit nulls
        assert_eq!(lines[1], r#"{"id":2,"note":"has, comma","flag":null}"#);
    }
}
