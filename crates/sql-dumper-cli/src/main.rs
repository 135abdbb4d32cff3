//! sql-dumper CLI - dump a primary-key range of related MySQL tables.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

use sql_dumper::{
    request, Config, CsvWriter, DataWriter, DumpError, ExportConfig, ExportMode, MysqlSource,
    Orchestrator, OsFileOpener, SimpleWriter, SourceDatabase, SqlWriter,
};

#[derive(Parser)]
#[command(name = "sql-dumper")]
#[command(about = "Dumps a primary-key range of related MySQL tables to SQL, CSV or text")]
#[command(version)]
#[command(after_help = "\
Formats:
  tables definitions:    table1:column11,column12,...;table2:column21;...
  primary interval:      start-end (both bounds inclusive)
  relations definitions: table1.column11=table2.column21;table2.column22=table3.column31

Example:
  sql-dumper \"routes:id,name;stations:id,sname;stations_for_routes:station_id,route_id,ord\" \\
      2000-2200 \\
      \"routes.id=stations_for_routes.route_id;stations.id=stations_for_routes.station_id\"")]
struct Cli {
    /// Tables definitions
    tables: String,

    /// Primary interval applied to the first column of the first table
    interval: String,

    /// Relations definitions
    relations: Option<String>,

    /// Path to YAML configuration file (ignored when DB_NAME is set in
    /// the environment)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output format: sql, csv or simple
    #[arg(long)]
    format: Option<String>,

    /// Single destination file
    #[arg(long)]
    file: Option<String>,

    /// Destination directory for per-table files
    #[arg(long)]
    dir: Option<String>,

    /// CSV field delimiter
    #[arg(long)]
    delimiter: Option<String>,

    /// Log verbosity: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DumpError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity)?;

    // Environment wins over the config file, matching the original
    // deployment convention.
    let mut config = if std::env::var("DB_NAME").map(|v| !v.is_empty()).unwrap_or(false) {
        Config::from_env()?
    } else {
        Config::load(&cli.config)?
    };

    if let Some(format) = cli.format {
        config.export.format = format;
    }
    if let Some(file) = cli.file {
        config.export.file = Some(file);
    }
    if let Some(dir) = cli.dir {
        config.export.dir = Some(dir);
    }
    if let Some(delimiter) = cli.delimiter {
        config.export.delimiter = delimiter;
    }
    config.validate()?;

    let query = request::parse(
        &cli.tables,
        &cli.interval,
        cli.relations.as_deref().unwrap_or(""),
    )?;

    let source = MysqlSource::new(&config.database).await?;
    let (mut writer, mode) = build_writer(&config.export);

    let result = Orchestrator::new(query)
        .run(&source, writer.as_mut(), mode)
        .await;
    source.close().await;
    let summary = result?;

    info!(
        "Export finished: {} tables, {} rows",
        summary.tables, summary.rows
    );
    Ok(())
}

/// Pick the writer and row mode for the requested format.
///
/// SQL output is always per table. CSV is one combined result set
/// unless a destination directory asks for per-table files. The simple
/// format prints one combined result set to stdout.
fn build_writer(export: &ExportConfig) -> (Box<dyn DataWriter>, ExportMode) {
    match export.format.as_str() {
        "sql" => {
            let writer = SqlWriter::new(
                Box::new(OsFileOpener::new()),
                export.file.clone(),
                export.dir.clone(),
            );
            (Box::new(writer), ExportMode::PerTable)
        }
        "csv" => {
            let mode = if export.dir.is_some() {
                ExportMode::PerTable
            } else {
                ExportMode::Combined
            };
            let writer = CsvWriter::new(
                Box::new(OsFileOpener::new()),
                export.file.clone(),
                export.dir.clone(),
                export.delimiter.clone(),
            );
            (Box::new(writer), mode)
        }
        _ => (Box::new(SimpleWriter::stdout()), ExportMode::Combined),
    }
}

fn setup_logging(verbosity: &str) -> Result<(), DumpError> {
    let level: Level = verbosity
        .parse()
        .map_err(|_| DumpError::Config(format!("unknown verbosity level '{}'", verbosity)))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
