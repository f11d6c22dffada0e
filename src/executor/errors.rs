//! Engine error types
//!
//! A request fails as a whole: either the plan is rejected before any record
//! is read, or the record source fails while serving it.

use thiserror::Error;

use crate::planner::QueryError;
use crate::storage::StoreError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine errors
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Rejected by the planner (client error)
    #[error(transparent)]
    Validation(#[from] QueryError),

    /// Record source failure (server error)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Stable wire code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(err) => err.code().code(),
            EngineError::Store(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_pass_through() {
        let err: EngineError = QueryError::invalid_age_range().into();
        assert_eq!(err.code(), "INVALID_AGE_RANGE");

        let err: EngineError = StoreError::Query("timeout".into()).into();
        assert_eq!(err.code(), "STORE_QUERY_FAILED");
        assert_eq!(err.to_string(), "Database query failed: timeout");
    }
}
