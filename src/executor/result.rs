//! Response envelope for a served listing query

use serde::Serialize;

use super::aggregator::SalesStats;
use super::paginator::PageInfo;
use crate::model::SalesRecord;
use crate::storage::SourceOutput;

/// Filter options offered to the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Tag vocabulary over the whole dataset
    pub tags: Vec<String>,
}

/// `{ data, stats, filters: { tags }, pagination }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub data: Vec<SalesRecord>,
    pub stats: SalesStats,
    pub filters: FilterOptions,
    pub pagination: PageInfo,
}

impl QueryResult {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<SourceOutput> for QueryResult {
    fn from(output: SourceOutput) -> Self {
        Self {
            data: output.records,
            stats: output.stats,
            filters: FilterOptions { tags: output.tags },
            pagination: output.page,
        }
    }
}
