//! Configuration file
//!
//! ```json
//! {
//!   "http": { "host": "0.0.0.0", "port": 5001, "cors_origins": [] },
//!   "source": { "type": "csv", "path": "./data/sales.csv" },
//!   "environment": "production",
//!   "logging": { "level": "info", "format": "text" }
//! }
//! ```
//!
//! A Postgres source is `{ "type": "postgres", "url": "...", "table":
//! "sales_transactions", "max_connections": 5 }`. `DATABASE_URL`, when set,
//! replaces the configured URL.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::{Environment, HttpServerConfig};
use crate::observability::LoggingConfig;
use crate::storage::{PostgresConfig, SalesSqlBuilder, SourceKind};

/// Environment variable overriding the Postgres URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Where records come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// CSV file loaded into memory
    Csv { path: PathBuf },
    /// Postgres table, queried per request
    Postgres(PostgresConfig),
}

impl SourceConfig {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceConfig::Csv { .. } => SourceKind::Csv,
            SourceConfig::Postgres(_) => SourceKind::Postgres,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener and CORS (optional)
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Record source (required)
    pub source: SourceConfig,

    /// Deployment environment (optional, default "production")
    #[serde(default)]
    pub environment: Environment,

    /// Log level and format (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;
        config.apply_database_url(std::env::var(DATABASE_URL_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration text without validating it
    pub fn from_json(content: &str) -> CliResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Replaces the Postgres URL when an override is present and non-blank
    pub fn apply_database_url(&mut self, url: Option<String>) {
        if let (SourceConfig::Postgres(pg), Some(url)) = (&mut self.source, url) {
            if !url.trim().is_empty() {
                pg.url = url;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        match &self.source {
            SourceConfig::Csv { path } => {
                if path.as_os_str().is_empty() {
                    return Err(CliError::config_error("source.path must not be empty"));
                }
            }
            SourceConfig::Postgres(pg) => {
                if pg.url.trim().is_empty() {
                    return Err(CliError::config_error(format!(
                        "source.url is required for a postgres source (or set {})",
                        DATABASE_URL_ENV
                    )));
                }
                if !SalesSqlBuilder::is_valid_table_name(&pg.table) {
                    return Err(CliError::config_error(format!(
                        "Invalid source.table: '{}'",
                        pg.table
                    )));
                }
                if pg.max_connections == 0 {
                    return Err(CliError::config_error("source.max_connections must be > 0"));
                }
            }
        }

        self.logging.filter().map_err(CliError::config_error)?;

        Ok(())
    }
}
