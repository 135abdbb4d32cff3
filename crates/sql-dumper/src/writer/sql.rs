//! SQL output: CREATE TABLE statements and one INSERT per row.

use std::io::Write;

use crate::error::{DumpError, Result};
use crate::ident::quote;
use crate::value::{Row, Value};
use crate::writer::{DataWriter, FileOpener};

/// Writes the export as executable SQL.
///
/// With a destination directory each table goes to `<dir>/<table>.sql`;
/// otherwise everything lands in the single destination file.
pub struct SqlWriter {
    opener: Box<dyn FileOpener>,
    dst_file: Option<String>,
    dst_dir: Option<String>,
}

impl SqlWriter {
    pub fn new(
        opener: Box<dyn FileOpener>,
        dst_file: Option<String>,
        dst_dir: Option<String>,
    ) -> Self {
        Self {
            opener,
            dst_file,
            dst_dir,
        }
    }

    fn filename(&self, table_name: &str) -> String {
        match (&self.dst_dir, &self.dst_file) {
            (Some(dir), _) => format!("{}/{}.sql", dir, table_name),
            (None, Some(file)) => file.clone(),
            (None, None) => "result.sql".to_string(),
        }
    }
}

impl DataWriter for SqlWriter {
    fn write_ddl(&mut self, table_name: &str, ddl: &str) -> Result<()> {
        // Dependent tables may be created before the tables they
        // reference, so keys are checked only after the import.
        let contents = format!(
            "SET FOREIGN_KEY_CHECKS=0;\n{}\nSET FOREIGN_KEY_CHECKS=1;\n",
            ddl
        );
        let mut file = self.opener.open(&self.filename(table_name))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| DumpError::write("DDL", e.to_string()))?;
        Ok(())
    }

    fn write_rows(&mut self, table_name: &str, columns: &[String], rows: &[Row]) -> Result<()> {
        let mut file = self.opener.open(&self.filename(table_name))?;

        let column_names = columns
            .iter()
            .map(|c| quote(c))
            .collect::<Vec<_>>()
            .join(", ");

        for row in rows {
            let values = columns
                .iter()
                .map(|column| sql_value(row.get(column).unwrap_or(&Value::Null)))
                .collect::<Vec<_>>()
                .join(", ");
            let insert = format!(
                "INSERT INTO {} ({}) VALUES ({});\n",
                quote(table_name),
                column_names,
                values
            );
            file.write_all(insert.as_bytes())
                .map_err(|e| DumpError::write("rows", e.to_string()))?;
        }
        Ok(())
    }
}

fn sql_value(value: &Value) -> String {
    match value {
        Value::Text(s) => escape_string(s),
        Value::Bytes(b) => escape_string(&String::from_utf8_lossy(b)),
        other => other.display_plain(),
    }
}

fn escape_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
