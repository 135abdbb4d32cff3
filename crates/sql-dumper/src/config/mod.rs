//! Configuration loading and validation.
//!
//! Connection settings come from a YAML file or, when `DB_NAME` is set,
//! from the `DB_*` environment variables. Either way they end up in an
//! explicit [`Config`] value handed to the rest of the program; nothing
//! reads the process environment past startup.

mod types;
mod validation;

pub use types::*;

use crate::error::{DumpError, Result};
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            DumpError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from `DB_HOST`, `DB_PORT`, `DB_USER`,
    /// `DB_PASSWORD` and `DB_NAME`.
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| std::env::var(key).unwrap_or_default();

        let port = match std::env::var("DB_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| DumpError::Config(format!("DB_PORT is not a port number: '{}'", value)))?,
            Err(_) => 3306,
        };

        let config = Config {
            database: DatabaseConfig {
                host: var("DB_HOST"),
                port,
                database: var("DB_NAME"),
                user: var("DB_USER"),
                password: var("DB_PASSWORD"),
            },
            export: ExportConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}
