//! Record sources
//!
//! One listing pipeline, several storage backends. Every backend implements
//! `RecordSource` and consumes the same typed `QueryPlan`:
//!
//! - `MemoryStore`: immutable snapshot loaded from CSV, evaluated in-process
//! - `PostgresStore`: filters, sort and pagination pushed down as SQL
//!
//! Both use the executor's `Paginator`, `SalesStats` rounding and
//! `TagVocabulary`, so the response contract does not depend on the backend.

mod errors;
mod loader;
mod memory;
mod postgres;
mod sql;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::executor::{PageInfo, SalesStats};
use crate::model::SalesRecord;
use crate::planner::QueryPlan;

pub use errors::{StoreError, StoreResult};
pub use loader::{parse_record_date, read_records, CsvLoader};
pub use memory::{MemoryStore, Snapshot};
pub use postgres::{PostgresConfig, PostgresStore};
pub use sql::{SalesSqlBuilder, DEFAULT_TABLE};

/// Backend identifier, reported by health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Postgres,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a source produces for one plan
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutput {
    /// The served page, sorted
    pub records: Vec<SalesRecord>,
    /// Stats over the full filtered set
    pub stats: SalesStats,
    /// Clamped page window
    pub page: PageInfo,
    /// Tag vocabulary over the unfiltered dataset
    pub tags: Vec<String>,
}

/// Outcome of a snapshot reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadSummary {
    pub record_count: u64,
    pub tags: u64,
    pub version: u64,
}

/// A filterable, sortable, paginable store of sales records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Which backend this is
    fn kind(&self) -> SourceKind;

    /// Number of records in the unfiltered dataset
    async fn record_count(&self) -> StoreResult<u64>;

    /// Runs a plan: filter, stats, sort, page, tags.
    ///
    /// All five parts must come from one consistent view of the data.
    async fn execute(&self, plan: &QueryPlan) -> StoreResult<SourceOutput>;

    /// Replaces the dataset from its origin, if the backend supports it
    async fn reload(&self) -> StoreResult<ReloadSummary> {
        Err(StoreError::ReloadUnsupported(self.kind()))
    }
}
