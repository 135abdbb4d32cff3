//! Error types for the export library.

use thiserror::Error;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed export request (tables, interval, or relations part)
    #[error("Invalid export request: {0}")]
    Request(String),

    /// Query construction failed before touching the database
    #[error("Query build failed: {0}")]
    QueryBuild(String),

    /// No relation mentions the given table; carries the full relation
    /// list for diagnosis
    #[error("Cannot find relation for table '{table}'. Relations: {relations}")]
    RelationNotFound { table: String, relations: String },

    /// DDL synthesis found none of the requested columns in the table
    #[error("Table '{0}' contains none of the specified fields")]
    NoRequestedFields(String),

    /// Database connection or query error
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    /// Destination file already exists; refusing to overwrite
    #[error("File '{0}' already exists")]
    FileExists(String),

    /// Write failure with context about what was being written
    #[error("Error writing {what} to file: {message}")]
    Write { what: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DumpError {
    /// Create a Write error with context about what was being written.
    pub fn write(what: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::Write {
            what: what.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Exit code for the CLI boundary.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumpError::Config(_) | DumpError::Request(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, DumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_not_found_message() {
        let err = DumpError::RelationNotFound {
            table: "people".to_string(),
            relations: "routes.id = stations_for_routes.route_id".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("people"));
        assert!(msg.contains("routes.id = stations_for_routes.route_id"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DumpError::Config("x".into()).exit_code(), 2);
        assert_eq!(DumpError::Request("x".into()).exit_code(), 2);
        assert_eq!(DumpError::FileExists("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_format_detailed_includes_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DumpError::Io(io);
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: IO error"));
        assert!(detailed.contains("denied"));
    }
}
