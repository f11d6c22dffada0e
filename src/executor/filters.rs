//! Predicate filtering for query execution
//!
//! All active dimensions must match (AND). Within a dimension:
//! - search: every term must match at least one searchable field
//! - sets: the record value must be one of the selected values
//! - tags: any selected tag equal to any record tag, case-insensitive
//! - ranges: inclusive on both ends

use std::borrow::Cow;

use crate::model::{FieldValue, SalesRecord};
use crate::planner::{SalesFilter, SetFilter};

/// Evaluates a compiled filter against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches every active dimension of the filter
    pub fn matches(record: &SalesRecord, filter: &SalesFilter) -> bool {
        Self::matches_search(record, &filter.search_terms)
            && filter.sets.iter().all(|set| Self::matches_set(record, set))
            && Self::matches_tags(record, &filter.tags)
            && Self::matches_age(record, filter.min_age, filter.max_age)
            && Self::matches_date(record, filter)
    }

    /// Applies the filter to a slice, keeping the original relative order
    pub fn apply<'a>(records: &'a [SalesRecord], filter: &SalesFilter) -> Vec<&'a SalesRecord> {
        if filter.is_empty() {
            return records.iter().collect();
        }
        records
            .iter()
            .filter(|record| Self::matches(record, filter))
            .collect()
    }

    fn matches_search(record: &SalesRecord, terms: &[String]) -> bool {
        terms.iter().all(|term| {
            SalesFilter::SEARCH_FIELDS.iter().any(|field| {
                text_of(record.value(*field))
                    .to_lowercase()
                    .contains(term.as_str())
            })
        })
    }

    fn matches_set(record: &SalesRecord, set: &SetFilter) -> bool {
        let value = text_of(record.value(set.field));
        set.values.iter().any(|v| v.as_str() == value.as_ref())
    }

    fn matches_tags(record: &SalesRecord, wanted: &[String]) -> bool {
        if wanted.is_empty() {
            return true;
        }
        record
            .tag_list()
            .map(str::to_lowercase)
            .any(|tag| wanted.iter().any(|w| *w == tag))
    }

    fn matches_age(record: &SalesRecord, min: Option<i64>, max: Option<i64>) -> bool {
        let age = i64::from(record.age);
        min.map_or(true, |min| age >= min) && max.map_or(true, |max| age <= max)
    }

    /// Records carry calendar dates, so `<= end_date` already covers the
    /// whole final day.
    fn matches_date(record: &SalesRecord, filter: &SalesFilter) -> bool {
        filter.start_date.map_or(true, |start| record.date >= start)
            && filter.end_date.map_or(true, |end| record.date <= end)
    }
}

fn text_of(value: FieldValue<'_>) -> Cow<'_, str> {
    match value {
        FieldValue::Text(s) => Cow::Borrowed(s),
        FieldValue::Integer(n) => Cow::Owned(n.to_string()),
        FieldValue::Decimal(d) => Cow::Owned(d.to_string()),
        FieldValue::Date(d) => Cow::Owned(d.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SalesField;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> SalesRecord {
        SalesRecord {
            transaction_id: "T1".into(),
            date: date(2023, 5, 10),
            customer_name: "Aisha Khan".into(),
            phone_number: "9876543210".into(),
            gender: "Female".into(),
            age: 29,
            customer_region: "North".into(),
            product_name: "Cotton Kurta".into(),
            product_category: "Clothing".into(),
            tags: "Electronics,Gadget".into(),
            payment_method: "UPI".into(),
            ..Default::default()
        }
    }

    fn filter() -> SalesFilter {
        SalesFilter::default()
    }

    #[test]
    fn test_empty_filter_matches() {
        assert!(PredicateFilter::matches(&record(), &filter()));
    }

    #[test]
    fn test_search_all_terms_must_match() {
        let f = SalesFilter {
            search_terms: vec!["aisha".into(), "clothing".into()],
            ..filter()
        };
        assert!(PredicateFilter::matches(&record(), &f));

        let f = SalesFilter {
            search_terms: vec!["aisha".into(), "electronics".into()],
            ..filter()
        };
        assert!(!PredicateFilter::matches(&record(), &f));
    }

    #[test]
    fn test_search_phone_substring() {
        let f = SalesFilter {
            search_terms: vec!["6543".into()],
            ..filter()
        };
        assert!(PredicateFilter::matches(&record(), &f));
    }

    #[test]
    fn test_set_membership() {
        let f = SalesFilter {
            sets: vec![SetFilter::new(
                SalesField::CustomerRegion,
                vec!["South".into(), "North".into()],
            )],
            ..filter()
        };
        assert!(PredicateFilter::matches(&record(), &f));

        let f = SalesFilter {
            sets: vec![SetFilter::new(SalesField::Gender, vec!["Male".into()])],
            ..filter()
        };
        assert!(!PredicateFilter::matches(&record(), &f));
    }

    #[test]
    fn test_tags_case_insensitive_member_match() {
        let f = SalesFilter {
            tags: vec!["gadget".into()],
            ..filter()
        };
        assert!(PredicateFilter::matches(&record(), &f));

        let f = SalesFilter {
            tags: vec!["phone".into()],
            ..filter()
        };
        assert!(!PredicateFilter::matches(&record(), &f));

        let f = SalesFilter {
            tags: vec!["phone".into(), "electronics".into()],
            ..filter()
        };
        assert!(PredicateFilter::matches(&record(), &f));
    }

    #[test]
    fn test_untagged_record_never_matches_tag_filter() {
        let untagged = SalesRecord {
            tags: String::new(),
            ..record()
        };
        let f = SalesFilter {
            tags: vec!["gadget".into()],
            ..filter()
        };
        assert!(!PredicateFilter::matches(&untagged, &f));
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let f = SalesFilter {
            min_age: Some(29),
            max_age: Some(29),
            ..filter()
        };
        assert!(PredicateFilter::matches(&record(), &f));

        let f = SalesFilter {
            min_age: Some(30),
            ..filter()
        };
        assert!(!PredicateFilter::matches(&record(), &f));
    }

    #[test]
    fn test_end_date_includes_whole_day() {
        let f = SalesFilter {
            start_date: Some(date(2023, 5, 10)),
            end_date: Some(date(2023, 5, 10)),
            ..filter()
        };
        assert!(PredicateFilter::matches(&record(), &f));

        let f = SalesFilter {
            end_date: Some(date(2023, 5, 9)),
            ..filter()
        };
        assert!(!PredicateFilter::matches(&record(), &f));
    }

    #[test]
    fn test_apply_preserves_order() {
        let records = vec![
            SalesRecord {
                transaction_id: "A".into(),
                ..record()
            },
            SalesRecord {
                transaction_id: "B".into(),
                age: 60,
                ..record()
            },
            SalesRecord {
                transaction_id: "C".into(),
                ..record()
            },
        ];
        let f = SalesFilter {
            max_age: Some(40),
            ..filter()
        };
        let ids: Vec<&str> = PredicateFilter::apply(&records, &f)
            .iter()
            .map(|r| r.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
    }
}
