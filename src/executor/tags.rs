//! Tag vocabulary over the unfiltered dataset
//!
//! Feeds the filter UI's option list, so it never depends on the filters
//! currently applied.

use std::collections::BTreeSet;

use crate::model::SalesRecord;

/// Builds the distinct, sorted tag list
pub struct TagVocabulary;

impl TagVocabulary {
    /// Distinct tags across `records`, sorted lexicographically
    pub fn extract<'a>(records: impl IntoIterator<Item = &'a SalesRecord>) -> Vec<String> {
        Self::from_raw(records.into_iter().map(|r| r.tags.as_str()))
    }

    /// Distinct tags from raw comma-delimited tag strings.
    ///
    /// Entries are trimmed and empties dropped before deduplication.
    pub fn from_raw<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        raw.into_iter()
            .flat_map(|tags| tags.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
