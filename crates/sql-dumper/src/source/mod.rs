//! Source database capability.
//!
//! The exporter needs exactly two things from the database: run a
//! parameterized SELECT with the two interval placeholders, and
//! describe a table's columns. [`SourceDatabase`] is the seam between
//! the query/DDL engine and the concrete driver, which keeps the
//! orchestrator testable without a live server.

mod mysql;

pub use mysql::MysqlSource;

use async_trait::async_trait;

use crate::ddl::ColumnDescription;
use crate::error::Result;
use crate::value::Row;

/// Read capability consumed by the orchestrator.
#[async_trait]
pub trait SourceDatabase {
    /// Execute a SELECT with two positional placeholders bound to the
    /// interval bounds, in order. Rows come back keyed by result
    /// column name (the alias in combined mode).
    async fn select_rows(&self, sql: &str, start: i64, end: i64) -> Result<Vec<Row>>;

    /// Fetch per-column metadata for a table, in the database's
    /// natural column order.
    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescription>>;

    /// Close the underlying connection pool.
    async fn close(&self);
}
