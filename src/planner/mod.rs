//! Query planner subsystem
//!
//! Turns raw listing parameters into a validated, typed plan.
//!
//! # Design Principles
//!
//! - Validation runs before any record is touched
//! - Inverted ranges reject the whole request; no partial results
//! - Field names resolve through the enumerated field catalog only
//! - Record sources receive the typed plan, never raw strings

mod ast;
mod errors;
mod explain;
mod planner;
mod request;

pub use ast::{PageRequest, SalesFilter, SetFilter, SortDirection, SortSpec};
pub use errors::{PlannerResult, QueryError, QueryErrorCode};
pub use explain::ExplainPlan;
pub use planner::{parse_date, QueryPlan, QueryPlanner};
pub use request::QueryRequest;
