//! Configuration validation.

use super::Config;
use crate::error::{DumpError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.database.host.is_empty() {
        return Err(DumpError::Config("database.host is required".into()));
    }
    if config.database.database.is_empty() {
        return Err(DumpError::Config("database.database is required".into()));
    }
    if config.database.user.is_empty() {
        return Err(DumpError::Config("database.user is required".into()));
    }

    match config.export.format.as_str() {
        "sql" | "csv" | "simple" => {}
        other => {
            return Err(DumpError::Config(format!(
                "export.format must be 'sql', 'csv' or 'simple', got '{}'",
                other
            )));
        }
    }

    if config.export.file.is_some() && config.export.dir.is_some() {
        return Err(DumpError::Config(
            "export.file and export.dir are mutually exclusive".into(),
        ));
    }

    if config.export.delimiter.is_empty() {
        return Err(DumpError::Config("export.delimiter must not be empty".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ExportConfig};

    fn valid_config() -> Config {
        Config {
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 3306,
                database: "source_db".to_string(),
                user: "root".to_string(),
                password: "password".to_string(),
            },
            export: ExportConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_host() {
        let mut config = valid_config();
        config.database.host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_database() {
        let mut config = valid_config();
        config.database.database = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_format() {
        let mut config = valid_config();
        config.export.format = "xml".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("export.format"));
    }

    #[test]
    fn test_file_and_dir_exclusive() {
        let mut config = valid_config();
        config.export.file = Some("out.sql".to_string());
        config.export.dir = Some("out".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_delimiter() {
        let mut config = valid_config();
        config.export.delimiter = "".to_string();
        assert!(validate(&config).is_err());
    }
}
