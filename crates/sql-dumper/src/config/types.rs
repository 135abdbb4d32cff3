//! Configuration type definitions.

use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection configuration.
    pub database: DatabaseConfig,

    /// Output configuration; every field has a default and can be
    /// overridden from the command line.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Database connection configuration.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 3306).
    #[serde(default = "default_mysql_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Output format: "sql", "csv" or "simple".
    #[serde(default = "default_format")]
    pub format: String,

    /// Single destination file. Mutually exclusive with `dir`.
    #[serde(default)]
    pub file: Option<String>,

    /// Destination directory for per-table files. Mutually exclusive
    /// with `file`.
    #[serde(default)]
    pub dir: Option<String>,

    /// CSV field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            file: None,
            dir: None,
            delimiter: default_delimiter(),
        }
    }
}

// Default value functions for serde
fn default_mysql_port() -> u16 {
    3306
}

fn default_format() -> String {
    "sql".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}
