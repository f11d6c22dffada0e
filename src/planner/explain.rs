//! Explain output
//!
//! Human-readable description of a plan, or of why it was rejected.

use std::fmt;

use serde::Serialize;

use super::errors::QueryError;
use super::planner::QueryPlan;

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Active filter dimensions, one line each
    pub predicates: Vec<String>,
    /// Sort description
    pub sort: Option<String>,
    /// Requested page
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<u64>,
    /// SQL a pushdown source would run, if attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let filter = &plan.filter;
        let mut predicates = Vec::new();

        for term in &filter.search_terms {
            predicates.push(format!(
                "search '{}' in Customer Name | Phone Number | Product Name | Product Category",
                term
            ));
        }
        for set in &filter.sets {
            predicates.push(format!("{} in [{}]", set.field, set.values.join(", ")));
        }
        if !filter.tags.is_empty() {
            predicates.push(format!("Tags any of [{}]", filter.tags.join(", ")));
        }
        if let Some(min) = filter.min_age {
            predicates.push(format!("Age >= {}", min));
        }
        if let Some(max) = filter.max_age {
            predicates.push(format!("Age <= {}", max));
        }
        if let Some(start) = filter.start_date {
            predicates.push(format!("Date >= {}", start));
        }
        if let Some(end) = filter.end_date {
            predicates.push(format!("Date <= {} (end of day)", end));
        }

        Self {
            accepted: true,
            predicates,
            sort: Some(format!("{} {}", plan.sort.field, plan.sort.direction.as_str())),
            page: Some(plan.page.page),
            limit: Some(plan.page.limit),
            sql: None,
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan for a rejected request
    pub fn from_error(error: &QueryError) -> Self {
        Self {
            accepted: false,
            predicates: Vec::new(),
            sort: None,
            page: None,
            limit: None,
            sql: None,
            rejection_reason: Some(error.message().to_string()),
            rejection_code: Some(error.code().code().to_string()),
        }
    }

    /// Attaches the SQL text a pushdown source would execute
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.accepted {
            return write!(
                f,
                "REJECTED {}: {}",
                self.rejection_code.as_deref().unwrap_or("UNKNOWN"),
                self.rejection_reason.as_deref().unwrap_or("")
            );
        }

        writeln!(f, "ACCEPTED")?;
        if self.predicates.is_empty() {
            writeln!(f, "  filter: (none)")?;
        }
        for predicate in &self.predicates {
            writeln!(f, "  filter: {}", predicate)?;
        }
        if let Some(sort) = &self.sort {
            writeln!(f, "  sort: {}", sort)?;
        }
        if let (Some(page), Some(limit)) = (self.page, self.limit) {
            writeln!(f, "  page: {} (limit {})", page, limit)?;
        }
        if let Some(sql) = &self.sql {
            writeln!(f, "  sql: {}", sql)?;
        }
        Ok(())
    }
}
