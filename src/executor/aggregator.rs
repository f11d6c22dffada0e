//! Summary statistics over the filtered set
//!
//! Computed before pagination, so the numbers describe every matching
//! record regardless of which page is served.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::SalesRecord;

/// The `stats` block of the response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    /// Sum of quantities
    pub total_units: i64,
    /// Sum of final (post-discount) amounts, rounded to the cent
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Sum of (total - final) amounts, rounded to the cent
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discount: Decimal,
}

impl SalesStats {
    /// Builds stats from raw sums, applying cent rounding
    pub fn from_sums(total_units: i64, total_amount: Decimal, total_discount: Decimal) -> Self {
        Self {
            total_units,
            total_amount: round_cents(total_amount),
            total_discount: round_cents(total_discount),
        }
    }
}

/// Half-up rounding at the cent: 20.005 → 20.01
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes stats in-process
pub struct Aggregator;

impl Aggregator {
    /// Sums over `records`; an empty set yields all-zero stats
    pub fn summarize(records: &[&SalesRecord]) -> SalesStats {
        let (units, amount, discount) = records.iter().fold(
            (0i64, Decimal::ZERO, Decimal::ZERO),
            |(units, amount, discount), record| {
                (
                    units + i64::from(record.quantity),
                    amount + record.final_amount,
                    discount + record.discount_amount(),
                )
            },
        );
        SalesStats::from_sums(units, amount, discount)
    }
}
