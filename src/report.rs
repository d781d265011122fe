//! Core report pipeline: CSV ingestion, per-row transformation, and
//! report assembly.
//!
//! Rows are processed in order, one at a time. Malformed rows are dropped,
//! counted, and logged; they never abort the run. The finished engine is
//! consumed into a [`Report`], the single output artifact.

use crate::error::Result;
use crate::record::{DerivedRecord, Record, RowDefect};
use crate::stats::Statistics;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{Read, Write};

/// Running count of dropped rows, by defect category.
///
/// Observable via [`ReportEngine::defects`] and the log; never embedded
/// in the report itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefectCounts {
    /// Rows with fewer than 2 fields.
    pub shape: usize,

    /// Rows whose amount field failed decimal conversion.
    pub conversion: usize,
}

impl DefectCounts {
    /// Total number of dropped rows.
    pub fn total(&self) -> usize {
        self.shape + self.conversion
    }

    fn bump(&mut self, defect: &RowDefect) {
        match defect {
            RowDefect::Shape { .. } => self.shape += 1,
            RowDefect::Conversion { .. } => self.conversion += 1,
        }
    }
}

/// The report pipeline engine.
///
/// Collects transformed records in input order, then is consumed into a
/// [`Report`]. Each stage's output is owned exclusively and handed off by
/// value; there is no shared mutable state.
pub struct ReportEngine {
    /// Tax rate applied to every record. Not clamped.
    rate: Decimal,

    /// Label identifying the input source, reproduced in report metadata.
    source_label: String,

    /// Transformed records in input order.
    records: Vec<DerivedRecord>,

    /// Dropped-row counters.
    defects: DefectCounts,
}

impl ReportEngine {
    /// Creates a new engine for the given rate and source label.
    pub fn new(rate: Decimal, source_label: impl Into<String>) -> Self {
        ReportEngine {
            rate,
            source_label: source_label.into(),
            records: Vec::new(),
            defects: DefectCounts::default(),
        }
    }

    /// Processes rows from a CSV reader.
    ///
    /// Rows are read one at a time. `has_headers` controls whether a leading
    /// header row is stripped. Malformed rows are logged at warn level with
    /// their content and defect category, then skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R, has_headers: bool) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(has_headers)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        // 1-indexed row numbers, accounting for the header row if present
        let first_row = if has_headers { 2 } else { 1 };

        for (row_idx, result) in csv_reader.records().enumerate() {
            let row_num = row_idx + first_row;

            match result {
                Ok(row) => match Record::parse(&row) {
                    Ok(record) => {
                        let derived = record.apply_rate(self.rate);
                        debug!(
                            "Row {}: record {} base {} adjusted {}",
                            row_num, derived.id, derived.base_amount, derived.adjusted_amount
                        );
                        self.records.push(derived);
                    }
                    Err(defect) => {
                        self.defects.bump(&defect);
                        warn!(
                            "Row {}: dropped ({}): {}; content: {:?}",
                            row_num,
                            defect.category(),
                            defect,
                            row
                        );
                    }
                },
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Returns the dropped-row counters.
    pub fn defects(&self) -> DefectCounts {
        self.defects
    }

    /// Number of valid records collected so far.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Consumes the engine into a [`Report`], stamping the current wall
    /// clock time.
    pub fn into_report(self) -> Report {
        self.into_report_at(Utc::now())
    }

    /// Consumes the engine into a [`Report`] with an explicit timestamp.
    ///
    /// The timestamp is captured once and shared by the metadata and the
    /// statistics, which keeps the clock an injectable collaborator for
    /// tests.
    pub fn into_report_at(self, generated_at: DateTime<Utc>) -> Report {
        let statistics = Statistics::aggregate(&self.records, generated_at);
        Report {
            metadata: Metadata {
                source_label: self.source_label,
                rate_applied: self.rate,
                generated_at,
            },
            statistics,
            records: self.records,
        }
    }
}

/// Report metadata: where the data came from and how it was transformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Label for the input source (defaults to the input path).
    pub source_label: String,

    /// The tax rate that was applied.
    pub rate_applied: Decimal,

    /// Same instant as `statistics.generated_at`.
    pub generated_at: DateTime<Utc>,
}

/// The terminal artifact of a pipeline run.
///
/// Owns copies of all constituent parts. A completed run always produces a
/// well-formed report, possibly with zero records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Run metadata.
    pub metadata: Metadata,

    /// Aggregate statistics over all records.
    pub statistics: Statistics,

    /// Transformed records in original input order.
    pub records: Vec<DerivedRecord>,
}

impl Report {
    /// Serializes the report as pretty-printed JSON.
    ///
    /// Amounts are rendered as strings with exactly 2 decimal places and
    /// records keep their input order.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Renders a human-readable summary of the statistics.
    pub fn render_summary(&self) -> String {
        let s = &self.statistics;
        let mut out = String::new();
        out.push_str("==================== TAX REPORT SUMMARY ====================\n");
        out.push_str(&format!("  Source:              {}\n", self.metadata.source_label));
        out.push_str(&format!("  Rate applied:        {}\n", self.metadata.rate_applied));
        out.push_str(&format!("  Records processed:   {}\n", s.count));
        out.push_str(&format!("  Total (before tax):  {:>14}\n", s.sum_base.to_string()));
        out.push_str(&format!("  Total (after tax):   {:>14}\n", s.sum_adjusted.to_string()));
        out.push_str(&format!("  Tax collected:       {:>14}\n", s.tax_collected.to_string()));
        out.push_str(&format!("  Average record:      {:>14}\n", s.average.to_string()));
        out.push_str(&format!("  Smallest record:     {:>14}\n", s.min.to_string()));
        out.push_str(&format!("  Largest record:      {:>14}\n", s.max.to_string()));
        out.push_str(&format!(
            "  Generated:           {}\n",
            s.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str("============================================================\n");
        out
    }
}
