//! Query planner
//!
//! Validates a raw request and compiles it into an immutable plan.
//!
//! Order of work (strict):
//! 1. Parse range bounds (age, date); reject unparsable values
//! 2. Reject inverted ranges before anything else runs
//! 3. Build the filter dimensions
//! 4. Resolve the sort field through the field catalog
//! 5. Resolve page and limit, falling back to defaults

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::ast::{PageRequest, SalesFilter, SetFilter, SortDirection, SortSpec};
use super::errors::{PlannerResult, QueryError};
use super::request::QueryRequest;
use crate::model::SalesField;

/// Immutable query plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub filter: SalesFilter,
    pub sort: SortSpec,
    pub page: PageRequest,
}

/// Stateless planner
pub struct QueryPlanner;

impl QueryPlanner {
    /// Plans a request, returning an immutable plan or a validation error.
    pub fn plan(request: &QueryRequest) -> PlannerResult<QueryPlan> {
        let min_age = parse_int_param("minAge", request.min_age.as_deref())?;
        let max_age = parse_int_param("maxAge", request.max_age.as_deref())?;
        let start_date = parse_date_param("startDate", request.start_date.as_deref())?;
        let end_date = parse_date_param("endDate", request.end_date.as_deref())?;

        Self::validate_ranges(min_age, max_age, start_date, end_date)?;

        let mut sets = Vec::new();
        for (field, raw) in [
            (SalesField::CustomerRegion, &request.region),
            (SalesField::Gender, &request.gender),
            (SalesField::ProductCategory, &request.category),
            (SalesField::PaymentMethod, &request.payment_method),
        ] {
            let values = split_list(raw.as_deref());
            if !values.is_empty() {
                sets.push(SetFilter::new(field, values));
            }
        }

        let filter = SalesFilter {
            search_terms: lowercase(split_list(request.search.as_deref())),
            sets,
            tags: lowercase(split_list(request.tags.as_deref())),
            min_age,
            max_age,
            start_date,
            end_date,
        };

        let sort = Self::resolve_sort(request.sort_by.as_deref(), request.sort_order.as_deref())?;

        let page = PageRequest::new(
            parse_lenient(request.page.as_deref())
                .filter(|p| *p != 0)
                .unwrap_or(PageRequest::DEFAULT_PAGE),
            parse_lenient(request.limit.as_deref())
                .filter(|l| *l >= 1)
                .map(|l| l as u64)
                .unwrap_or(PageRequest::DEFAULT_LIMIT),
        );

        Ok(QueryPlan { filter, sort, page })
    }

    /// Rejects inverted ranges. Only checked when both bounds are present.
    pub fn validate_ranges(
        min_age: Option<i64>,
        max_age: Option<i64>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> PlannerResult<()> {
        if let (Some(min), Some(max)) = (min_age, max_age) {
            if min > max {
                return Err(QueryError::invalid_age_range());
            }
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(QueryError::invalid_date_range());
            }
        }
        Ok(())
    }

    fn resolve_sort(sort_by: Option<&str>, sort_order: Option<&str>) -> PlannerResult<SortSpec> {
        let name = match sort_by.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(SortSpec::newest_first()),
        };
        let field = SalesField::resolve(name).ok_or_else(|| QueryError::invalid_sort_field(name))?;
        Ok(SortSpec {
            field,
            direction: SortDirection::parse(sort_order),
        })
    }
}

/// Comma-split, trim, drop empty entries
fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn lowercase(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

/// Blank counts as absent
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_int_param(name: &str, raw: Option<&str>) -> PlannerResult<Option<i64>> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| QueryError::invalid_parameter(name, value, "an integer")),
    }
}

fn parse_date_param(name: &str, raw: Option<&str>) -> PlannerResult<Option<NaiveDate>> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| QueryError::invalid_parameter(name, value, "a date (YYYY-MM-DD)")),
    }
}

/// Accepts a calendar date or a timestamp; timestamps keep their date part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts.date());
        }
    }
    None
}

/// Leading-integer parse used for page and limit: "2", " 3 ", "4.9" → 4,
/// "3px" → 3. Input without leading digits is treated as absent.
fn parse_lenient(raw: Option<&str>) -> Option<i64> {
    let value = non_blank(raw)?;
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::errors::QueryErrorCode;

    fn request() -> QueryRequest {
        QueryRequest::default()
    }

    #[test]
    fn test_empty_request_uses_defaults() {
        let plan = QueryPlanner::plan(&request()).unwrap();
        assert!(plan.filter.is_empty());
        assert_eq!(plan.sort, SortSpec::newest_first());
        assert_eq!(plan.page, PageRequest::new(1, 10));
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let req = QueryRequest {
            min_age: Some("50".into()),
            max_age: Some("20".into()),
            ..request()
        };
        let err = QueryPlanner::plan(&req).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::InvalidAgeRange);
    }

    #[test]
    fn test_equal_age_bounds_accepted() {
        let req = QueryRequest {
            min_age: Some("30".into()),
            max_age: Some("30".into()),
            ..request()
        };
        let plan = QueryPlanner::plan(&req).unwrap();
        assert_eq!(plan.filter.min_age, Some(30));
        assert_eq!(plan.filter.max_age, Some(30));
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let req = QueryRequest {
            start_date: Some("2023-06-01".into()),
            end_date: Some("2023-01-01".into()),
            ..request()
        };
        let err = QueryPlanner::plan(&req).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::InvalidDateRange);
    }

    #[test]
    fn test_unparsable_age_rejected() {
        let req = QueryRequest {
            min_age: Some("abc".into()),
            ..request()
        };
        let err = QueryPlanner::plan(&req).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::InvalidParameter);
        assert_eq!(err.parameter(), Some("minAge"));
    }

    #[test]
    fn test_unparsable_date_rejected() {
        let req = QueryRequest {
            end_date: Some("yesterday".into()),
            ..request()
        };
        let err = QueryPlanner::plan(&req).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::InvalidParameter);
    }

    #[test]
    fn test_blank_parameters_are_absent() {
        let req = QueryRequest {
            search: Some("".into()),
            region: Some(" , ".into()),
            min_age: Some("  ".into()),
            ..request()
        };
        let plan = QueryPlanner::plan(&req).unwrap();
        assert!(plan.filter.is_empty());
    }

    #[test]
    fn test_search_terms_split_and_lowercased() {
        let req = QueryRequest {
            search: Some("Aisha, CLOTHING ,".into()),
            ..request()
        };
        let plan = QueryPlanner::plan(&req).unwrap();
        assert_eq!(plan.filter.search_terms, vec!["aisha", "clothing"]);
    }

    #[test]
    fn test_set_filters_built_per_dimension() {
        let req = QueryRequest {
            region: Some("North,South".into()),
            payment_method: Some("UPI".into()),
            ..request()
        };
        let plan = QueryPlanner::plan(&req).unwrap();
        assert_eq!(
            plan.filter.sets,
            vec![
                SetFilter::new(SalesField::CustomerRegion, vec!["North".into(), "South".into()]),
                SetFilter::new(SalesField::PaymentMethod, vec!["UPI".into()]),
            ]
        );
    }

    #[test]
    fn test_sort_resolution() {
        let req = QueryRequest {
            sort_by: Some("Total Amount".into()),
            sort_order: Some("DESC".into()),
            ..request()
        };
        let plan = QueryPlanner::plan(&req).unwrap();
        assert_eq!(plan.sort, SortSpec::desc(SalesField::TotalAmount));
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let req = QueryRequest {
            sort_by: Some("Shoe Size".into()),
            ..request()
        };
        let err = QueryPlanner::plan(&req).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::InvalidSortField);
    }

    #[test]
    fn test_page_and_limit_fallbacks() {
        let req = QueryRequest {
            page: Some("abc".into()),
            limit: Some("none".into()),
            ..request()
        };
        assert_eq!(QueryPlanner::plan(&req).unwrap().page, PageRequest::new(1, 10));

        let req = QueryRequest {
            page: Some("0".into()),
            limit: Some("-5".into()),
            ..request()
        };
        assert_eq!(QueryPlanner::plan(&req).unwrap().page, PageRequest::new(1, 10));

        let req = QueryRequest {
            page: Some("-3".into()),
            limit: Some("25.7".into()),
            ..request()
        };
        assert_eq!(QueryPlanner::plan(&req).unwrap().page, PageRequest::new(-3, 25));
    }

    #[test]
    fn test_page_and_limit_keep_leading_digits() {
        let req = QueryRequest {
            page: Some("2abc".into()),
            limit: Some("3px".into()),
            ..request()
        };
        assert_eq!(QueryPlanner::plan(&req).unwrap().page, PageRequest::new(2, 3));

        assert_eq!(parse_lenient(Some("+7")), Some(7));
        assert_eq!(parse_lenient(Some("1e3")), Some(1));
        assert_eq!(parse_lenient(Some("-")), None);
        assert_eq!(parse_lenient(Some(".5")), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(parse_date("2023-01-31"), Some(expected));
        assert_eq!(parse_date("2023-01-31T18:30:00Z"), Some(expected));
        assert_eq!(parse_date("2023-01-31T18:30:00"), Some(expected));
        assert_eq!(parse_date("31/01/2023"), None);
    }
}
