//! # Record Store Errors
//!
//! Storage failures are surfaced as HTTP 500 (409 for an unsupported
//! reload), logged, and never retried by this layer.

use thiserror::Error;

use super::SourceKind;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    // I/O errors
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    // Data errors
    #[error("Invalid CSV data at line {line}: {message}")]
    InvalidCsv { line: u64, message: String },

    // Database errors
    #[error("Database connection failed: {0}")]
    Connect(String),

    #[error("Database query failed: {0}")]
    Query(String),

    // Lifecycle errors
    #[error("Reload is not supported by the {0} source")]
    ReloadUnsupported(SourceKind),
}

impl StoreError {
    /// Stable error code for logs and error bodies
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "STORE_IO_FAILED",
            StoreError::InvalidCsv { .. } => "STORE_CSV_INVALID",
            StoreError::Connect(_) => "STORE_CONNECT_FAILED",
            StoreError::Query(_) => "STORE_QUERY_FAILED",
            StoreError::ReloadUnsupported(_) => "RELOAD_UNSUPPORTED",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Connect(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}
