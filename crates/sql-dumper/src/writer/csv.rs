//! CSV output: a quoted header row, then one CRLF-terminated line per
//! row. DDL has no CSV representation and is skipped.

use std::io::Write;

use crate::error::{DumpError, Result};
use crate::value::{Row, Value};
use crate::writer::{DataWriter, FileOpener};

/// Writes result sets as delimiter-separated values.
///
/// With a destination directory each table goes to `<dir>/<table>.csv`;
/// otherwise everything lands in the single destination file.
pub struct CsvWriter {
    opener: Box<dyn FileOpener>,
    dst_file: Option<String>,
    dst_dir: Option<String>,
    delimiter: String,
}

impl CsvWriter {
    pub fn new(
        opener: Box<dyn FileOpener>,
        dst_file: Option<String>,
        dst_dir: Option<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            opener,
            dst_file,
            dst_dir,
            delimiter: delimiter.into(),
        }
    }

    fn filename(&self, table_name: &str) -> String {
        match (&self.dst_dir, &self.dst_file) {
            (Some(dir), _) => format!("{}/{}.csv", dir, table_name),
            (None, Some(file)) => file.clone(),
            (None, None) => "result.csv".to_string(),
        }
    }
}

impl DataWriter for CsvWriter {
    fn write_ddl(&mut self, _table_name: &str, _ddl: &str) -> Result<()> {
        Ok(())
    }

    fn write_rows(&mut self, table_name: &str, columns: &[String], rows: &[Row]) -> Result<()> {
        let mut file = self.opener.open(&self.filename(table_name))?;

        let header = columns
            .iter()
            .map(|c| escape_field(c))
            .collect::<Vec<_>>()
            .join(&self.delimiter);
        file.write_all(format!("{}\r\n", header).as_bytes())
            .map_err(|e| DumpError::write("header", e.to_string()))?;

        for row in rows {
            let line = columns
                .iter()
                .map(|column| csv_value(row.get(column).unwrap_or(&Value::Null)))
                .collect::<Vec<_>>()
                .join(&self.delimiter);
            file.write_all(format!("{}\r\n", line).as_bytes())
                .map_err(|e| DumpError::write("rows", e.to_string()))?;
        }
        Ok(())
    }
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::Text(s) => escape_field(s),
        Value::Bytes(b) => escape_field(&String::from_utf8_lossy(b)),
        other => other.display_plain(),
    }
}

fn escape_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
