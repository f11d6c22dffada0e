//! Result sorting for query execution
//!
//! Sort is stable: records with equal keys keep their relative order in
//! both directions, which keeps pagination deterministic.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::model::{FieldKind, FieldValue, SalesRecord};
use crate::planner::{SortDirection, SortSpec};

/// Sorts result records
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records according to the sort specification.
    pub fn sort(records: &mut [&SalesRecord], sort_spec: &SortSpec) {
        let kind = sort_spec.field.kind();
        records.sort_by(|a, b| {
            let ordering = Self::compare_values(
                kind,
                a.value(sort_spec.field),
                b.value(sort_spec.field),
            );

            match sort_spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Compares two values of the same field.
    ///
    /// - numeric fields compare as numbers
    /// - dates compare chronologically
    /// - text compares case-insensitively
    fn compare_values(kind: FieldKind, a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
        match kind {
            FieldKind::Integer | FieldKind::Decimal => numeric(a).cmp(&numeric(b)),
            FieldKind::Date => match (a, b) {
                (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(&b),
                _ => Ordering::Equal,
            },
            FieldKind::Text => match (a, b) {
                (FieldValue::Text(a), FieldValue::Text(b)) => {
                    a.to_lowercase().cmp(&b.to_lowercase())
                }
                _ => Ordering::Equal,
            },
        }
    }
}

/// Numeric view of a value; anything non-numeric counts as zero
fn numeric(value: FieldValue<'_>) -> Decimal {
    match value {
        FieldValue::Integer(n) => Decimal::from(n),
        FieldValue::Decimal(d) => d,
        FieldValue::Text(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        FieldValue::Date(_) => Decimal::ZERO,
    }
}
