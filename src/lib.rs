//! salesdash - Sales transaction listing API
//!
//! Serves one listing endpoint over a sales dataset: full-text search,
//! multi-select filters, age and date ranges, sorting, pagination, summary
//! statistics and the tag vocabulary. Records come from a CSV file held in
//! memory or from a Postgres table.

pub mod cli;
pub mod executor;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod planner;
pub mod storage;
