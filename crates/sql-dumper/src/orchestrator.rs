//! Export orchestrator - sequences the whole run.
//!
//! The flow is strictly sequential: validate the interval, emit DDL for
//! every table (declaration order), then emit rows per table or one
//! combined result set. The first failure at any stage aborts the run;
//! nothing is retried.

use tracing::{debug, info};

use crate::ddl;
use crate::error::Result;
use crate::query::Query;
use crate::source::SourceDatabase;
use crate::writer::DataWriter;

/// How row sets are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// One result set per declared table.
    PerTable,
    /// One joined result set across all declared tables.
    Combined,
}

/// Result of an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Tables for which DDL was written.
    pub tables: usize,
    /// Total rows written across all result sets.
    pub rows: usize,
}

/// Export orchestrator.
pub struct Orchestrator {
    query: Query,
}

impl Orchestrator {
    pub fn new(query: Query) -> Self {
        Self { query }
    }

    /// Run the export against the given source, handing DDL and rows to
    /// the writer. All DDL is written before any rows.
    pub async fn run(
        &self,
        source: &dyn SourceDatabase,
        writer: &mut dyn DataWriter,
        mode: ExportMode,
    ) -> Result<ExportSummary> {
        let (start, end) = self.query.interval()?;
        info!(
            "Starting export of {} tables, interval [{}, {}]",
            self.query.tables().len(),
            start,
            end
        );

        for table in self.query.tables() {
            let description = source.describe_table(&table.name).await?;
            let table_ddl = ddl::create_table(
                &table.name,
                &description,
                &table.columns,
                self.query.relations(),
            )?;
            writer.write_ddl(&table.name, &table_ddl)?;
            debug!("Wrote DDL for table '{}'", table.name);
        }

        let mut rows_written = 0;
        match mode {
            ExportMode::Combined => {
                let sql = self.query.combined_sql();
                let rows = source.select_rows(&sql, start, end).await?;
                rows_written += rows.len();
                writer.write_rows("combined", &self.query.all_columns(), &rows)?;
                info!("Wrote {} combined rows", rows_written);
            }
            ExportMode::PerTable => {
                for (index, table) in self.query.tables().iter().enumerate() {
                    let sql = if index == 0 {
                        self.query.single_table_sql(table)?
                    } else {
                        self.query.related_table_sql(table)?
                    };
                    let rows = source.select_rows(&sql, start, end).await?;
                    info!("Table '{}': {} rows", table.name, rows.len());
                    rows_written += rows.len();
                    writer.write_rows(&table.name, &table.columns, &rows)?;
                }
            }
        }

        Ok(ExportSummary {
            tables: self.query.tables().len(),
            rows: rows_written,
        })
    }
}
