//! Row parsing and the per-record tax transformation.
//!
//! A raw CSV row either becomes a validated [`Record`] or a [`RowDefect`]
//! explaining why it was dropped. Defects never abort the run; the caller
//! reports them and moves on to the next row.

use crate::amount::Amount;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// A per-row condition preventing `Record` construction.
///
/// Each variant maps to one defect category reported to the diagnostic sink.
/// Defects are non-fatal: the offending row is dropped and counted while the
/// pipeline continues.
#[derive(Error, Debug)]
pub enum RowDefect {
    /// Row has fewer than the 2 required fields (identifier, amount).
    #[error("row has {fields} field(s), expected at least 2")]
    Shape { fields: usize },

    /// The amount field is not parseable as a finite decimal.
    #[error("amount {value:?} is not a finite decimal: {source}")]
    Conversion {
        value: String,
        source: rust_decimal::Error,
    },
}

impl RowDefect {
    /// Stable category name for log output: `shape` or `conversion`.
    pub fn category(&self) -> &'static str {
        match self {
            RowDefect::Shape { .. } => "shape",
            RowDefect::Conversion { .. } => "conversion",
        }
    }
}

/// A validated sales record parsed from one CSV row.
///
/// Immutable once created; the base amount is guaranteed finite and at
/// 2 decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record identifier, taken verbatim from the first field.
    pub id: String,

    /// Amount before tax.
    pub base_amount: Amount,
}

impl Record {
    /// Parses a raw CSV row into a `Record`.
    ///
    /// Field 0 is the identifier (no validation beyond presence), field 1
    /// the base amount. Extra fields are ignored. Parsing is pure: no two
    /// rows interact.
    pub fn parse(row: &StringRecord) -> Result<Self, RowDefect> {
        if row.len() < 2 {
            return Err(RowDefect::Shape { fields: row.len() });
        }

        let id = row[0].to_string();
        let raw_amount = &row[1];
        let base_amount = Amount::from_str(raw_amount).map_err(|e| RowDefect::Conversion {
            value: raw_amount.to_string(),
            source: e,
        })?;

        Ok(Record { id, base_amount })
    }

    /// Applies the tax rate, producing a [`DerivedRecord`].
    ///
    /// `adjusted_amount = round2(base * (1 + rate))`, rounded half-to-even.
    /// The rate is not clamped: negative rates produce an adjusted amount
    /// below the base, rates above 1 more than double it. Total and
    /// deterministic; never fails for a valid record.
    pub fn apply_rate(&self, rate: Decimal) -> DerivedRecord {
        let adjusted = self.base_amount.as_decimal() * (Decimal::ONE + rate);
        DerivedRecord {
            id: self.id.clone(),
            base_amount: self.base_amount,
            adjusted_amount: Amount::new(adjusted),
        }
    }
}

/// A record with the tax rate applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRecord {
    /// Record identifier.
    pub id: String,

    /// Amount before tax.
    pub base_amount: Amount,

    /// Amount after tax: `round2(base * (1 + rate))`.
    pub adjusted_amount: Amount,
}
