//! Typed query plan structures
//!
//! The planner turns a raw `QueryRequest` into these; record sources only
//! ever see the typed form.

use chrono::NaiveDate;

use crate::model::SalesField;

/// Membership filter: the field value must equal one of `values`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFilter {
    pub field: SalesField,
    pub values: Vec<String>,
}

impl SetFilter {
    pub fn new(field: SalesField, values: Vec<String>) -> Self {
        Self { field, values }
    }
}

/// Compiled filter. Dimensions are AND-combined; an empty dimension is
/// inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesFilter {
    /// Lowercased search terms; every term must match some searchable field
    pub search_terms: Vec<String>,
    /// Region, gender, category and payment method membership filters
    pub sets: Vec<SetFilter>,
    /// Lowercased tags; any one matching a record tag is enough
    pub tags: Vec<String>,
    /// Inclusive lower age bound
    pub min_age: Option<i64>,
    /// Inclusive upper age bound
    pub max_age: Option<i64>,
    /// Inclusive first day
    pub start_date: Option<NaiveDate>,
    /// Inclusive last day (the whole day counts)
    pub end_date: Option<NaiveDate>,
}

impl SalesFilter {
    /// Fields the search terms are matched against
    pub const SEARCH_FIELDS: [SalesField; 4] = [
        SalesField::CustomerName,
        SalesField::PhoneNumber,
        SalesField::ProductName,
        SalesField::ProductCategory,
    ];

    /// Returns true if no dimension is active
    pub fn is_empty(&self) -> bool {
        self.search_terms.is_empty()
            && self.sets.is_empty()
            && self.tags.is_empty()
            && self.min_age.is_none()
            && self.max_age.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// "desc" in any case is descending; anything else is ascending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SalesField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: SalesField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SalesField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Newest first; used when no sortBy is supplied
    pub fn newest_first() -> Self {
        Self::desc(SalesField::Date)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::newest_first()
    }
}

/// Requested page window, before clamping against the result size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested 1-based page; may be out of range
    pub page: i64,
    /// Page size, always >= 1
    pub limit: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(page: i64, limit: u64) -> Self {
        Self {
            page,
            limit: limit.max(1),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(None), SortDirection::Asc);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let sort = SortSpec::default();
        assert_eq!(sort.field, SalesField::Date);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_page_request_limit_floor() {
        assert_eq!(PageRequest::new(1, 0).limit, 1);
    }

    #[test]
    fn test_empty_filter() {
        assert!(SalesFilter::default().is_empty());
        let filter = SalesFilter {
            min_age: Some(18),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
