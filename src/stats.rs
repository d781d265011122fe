//! Aggregate statistics over a sequence of derived records.

use crate::amount::Amount;
use crate::record::DerivedRecord;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Summary statistics for one pipeline run.
///
/// Constructed once by [`Statistics::aggregate`] and never mutated.
/// All results depend only on the multiset of amounts, never on record
/// order.
///
/// # Zero-state
///
/// When no valid records exist, every amount (including `min` and `max`)
/// is `Amount::ZERO` and `count` is 0. This is a documented sentinel, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of valid records aggregated.
    pub count: usize,

    /// Sum of base amounts, rounded once at the end.
    pub sum_base: Amount,

    /// Sum of the per-record-rounded adjusted amounts.
    pub sum_adjusted: Amount,

    /// `round2(sum_base / count)`, or zero for an empty run.
    pub average: Amount,

    /// Smallest base amount.
    pub min: Amount,

    /// Largest base amount.
    pub max: Amount,

    /// `round2(sum_adjusted - sum_base)`.
    pub tax_collected: Amount,

    /// Wall-clock instant the aggregation was performed, captured once
    /// by the caller.
    pub generated_at: DateTime<Utc>,
}

impl Statistics {
    /// The zero-state returned for an empty run.
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Statistics {
            count: 0,
            sum_base: Amount::ZERO,
            sum_adjusted: Amount::ZERO,
            average: Amount::ZERO,
            min: Amount::ZERO,
            max: Amount::ZERO,
            tax_collected: Amount::ZERO,
            generated_at,
        }
    }

    /// Computes statistics over the full record sequence in a single pass.
    ///
    /// Sums are carried at full precision and rounded once at the end to
    /// avoid compounding rounding error. `min` and `max` range over base
    /// amounts only. The caller supplies `generated_at` so the wall clock
    /// stays an explicit collaborator.
    pub fn aggregate(records: &[DerivedRecord], generated_at: DateTime<Utc>) -> Self {
        let first = match records.first() {
            Some(record) => record,
            None => return Statistics::empty(generated_at),
        };

        let mut sum_base = Decimal::ZERO;
        let mut sum_adjusted = Decimal::ZERO;
        let mut min = first.base_amount;
        let mut max = first.base_amount;

        for record in records {
            sum_base += record.base_amount.as_decimal();
            sum_adjusted += record.adjusted_amount.as_decimal();
            min = min.min(record.base_amount);
            max = max.max(record.base_amount);
        }

        let count = records.len();
        let average = Amount::new(sum_base / Decimal::from(count as u64));

        Statistics {
            count,
            sum_base: Amount::new(sum_base),
            sum_adjusted: Amount::new(sum_adjusted),
            average,
            min,
            max,
            tax_collected: Amount::new(sum_adjusted - sum_base),
            generated_at,
        }
    }
}
