//! Human-readable output for quick inspection on a terminal.

use std::io::Write;

use crate::error::Result;
use crate::value::{Row, Value};
use crate::writer::DataWriter;

/// Writes a plain-text dump to any stream, stdout by default.
///
/// Each row prints as `column = value;||` pairs in column order.
pub struct SimpleWriter<W: Write> {
    out: W,
}

impl SimpleWriter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> SimpleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DataWriter for SimpleWriter<W> {
    fn write_ddl(&mut self, _table_name: &str, ddl: &str) -> Result<()> {
        writeln!(self.out, "{}", ddl)?;
        Ok(())
    }

    fn write_rows(&mut self, table_name: &str, columns: &[String], rows: &[Row]) -> Result<()> {
        writeln!(self.out, "{}", table_name)?;
        for row in rows {
            for column in columns {
                let value = row.get(column).unwrap_or(&Value::Null);
                write!(self.out, "{} = {};||", column, value.display_plain())?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}
