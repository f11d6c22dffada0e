//! Log subscriber setup
//!
//! Text output is compact and human-oriented; JSON output is one object
//! per line for log shippers. The level string is an `EnvFilter`
//! directive, so per-target levels like `salesdash=debug,sqlx=warn` work.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Parses the level directive
    pub fn filter(&self) -> Result<EnvFilter, String> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| format!("invalid log level '{}': {}", self.level, e))
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Installing twice
/// is a no-op, so tests and embedded callers can call this freely.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| config.filter())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let base = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = match config.format {
        LogFormat::Json => Box::new(base.json().finish()),
        LogFormat::Text => Box::new(base.compact().finish()),
    };

    let _ = tracing::subscriber::set_global_default(subscriber);
}
