//! Planner error types
//!
//! Error codes (all rejected with HTTP 400, never retried):
//! - INVALID_AGE_RANGE
//! - INVALID_DATE_RANGE
//! - INVALID_PARAMETER
//! - INVALID_SORT_FIELD

use std::fmt;

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// minAge greater than maxAge
    InvalidAgeRange,
    /// startDate after endDate
    InvalidDateRange,
    /// A parameter is present but cannot be parsed
    InvalidParameter,
    /// sortBy does not name a known field
    InvalidSortField,
}

impl QueryErrorCode {
    /// Returns the wire code sent in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::InvalidAgeRange => "INVALID_AGE_RANGE",
            QueryErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            QueryErrorCode::InvalidParameter => "INVALID_PARAMETER",
            QueryErrorCode::InvalidSortField => "INVALID_SORT_FIELD",
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rejected query with a client-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
    parameter: Option<String>,
}

impl QueryError {
    /// minAge > maxAge
    pub fn invalid_age_range() -> Self {
        Self {
            code: QueryErrorCode::InvalidAgeRange,
            message: "Invalid age range: minimum age cannot be greater than maximum age"
                .to_string(),
            parameter: None,
        }
    }

    /// startDate > endDate
    pub fn invalid_date_range() -> Self {
        Self {
            code: QueryErrorCode::InvalidDateRange,
            message: "Invalid date range: start date cannot be after end date".to_string(),
            parameter: None,
        }
    }

    /// Unparsable parameter value
    pub fn invalid_parameter(parameter: &str, value: &str, expected: &str) -> Self {
        Self {
            code: QueryErrorCode::InvalidParameter,
            message: format!(
                "Invalid value '{}' for parameter '{}': expected {}",
                value, parameter, expected
            ),
            parameter: Some(parameter.to_string()),
        }
    }

    /// Unknown sort field
    pub fn invalid_sort_field(name: &str) -> Self {
        Self {
            code: QueryErrorCode::InvalidSortField,
            message: format!("Cannot sort by unknown field '{}'", name),
            parameter: Some("sortBy".to_string()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the client-facing message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending parameter, if one is singled out
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for QueryError {}

/// Result type for planning
pub type PlannerResult<T> = Result<T, QueryError>;
