//! Query executor subsystem
//!
//! Consumes validated plans and produces the listing response.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter records by every active predicate
//! 2. Summarize the full filtered set (stats)
//! 3. Sort (stable)
//! 4. Clamp the page and slice
//! 5. Attach the unfiltered tag vocabulary
//!
//! The building blocks are shared: the in-memory source runs all five
//! in-process, the Postgres source pushes 1-4 down and reuses the page
//! arithmetic, stats rounding and tag normalization.

mod aggregator;
mod errors;
mod executor;
mod filters;
mod paginator;
mod result;
mod sorter;
mod tags;

pub use aggregator::{round_cents, Aggregator, SalesStats};
pub use errors::{EngineError, EngineResult};
pub use executor::SalesQueryEngine;
pub use filters::PredicateFilter;
pub use paginator::{PageInfo, Paginator};
pub use result::{FilterOptions, QueryResult};
pub use sorter::ResultSorter;
pub use tags::TagVocabulary;
