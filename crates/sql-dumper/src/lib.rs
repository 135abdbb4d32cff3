//! # sql-dumper
//!
//! Range-based export of related MySQL tables.
//!
//! Given a declarative request - tables with their columns, equi-join
//! relations between them, and one inclusive primary-key interval -
//! this library:
//!
//! - builds one SELECT per table (the anchor table filtered by the
//!   interval, every other table correlated through its relation), or
//!   one joined SELECT in combined mode
//! - reconstructs CREATE TABLE DDL from live column metadata, scoped to
//!   the requested columns, with keys, indexes and inferred foreign
//!   keys
//! - hands DDL and row sets to a pluggable writer (SQL inserts, CSV, or
//!   plain text)
//!
//! ## Example
//!
//! ```rust,no_run
//! use sql_dumper::{
//!     request, Config, ExportMode, MysqlSource, Orchestrator, OsFileOpener, SqlWriter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> sql_dumper::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let query = request::parse(
//!         "routes:id,name;stations_for_routes:station_id,route_id",
//!         "1000-2000",
//!         "routes.id=stations_for_routes.route_id",
//!     )?;
//!
//!     let source = MysqlSource::new(&config.database).await?;
//!     let mut writer = SqlWriter::new(Box::new(OsFileOpener::new()), None, None);
//!     let summary = Orchestrator::new(query)
//!         .run(&source, &mut writer, ExportMode::PerTable)
//!         .await?;
//!     println!("Exported {} rows", summary.rows);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod ddl;
pub mod error;
pub mod ident;
pub mod orchestrator;
pub mod query;
pub mod request;
pub mod source;
pub mod value;
pub mod writer;

// Re-exports for convenient access
pub use config::{Config, DatabaseConfig, ExportConfig};
pub use ddl::{ColumnDescription, KeyKind};
pub use error::{DumpError, Result};
pub use orchestrator::{ExportMode, ExportSummary, Orchestrator};
pub use query::{Endpoint, Query, Relation, TableSelection};
pub use source::{MysqlSource, SourceDatabase};
pub use value::{Row, Value};
pub use writer::{CsvWriter, DataWriter, FileOpener, OsFileOpener, SimpleWriter, SqlWriter};
