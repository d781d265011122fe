//! # Tax Report
//!
//! A single-pass pipeline that ingests tabular sales records, applies a
//! tax rate, and assembles a JSON report with aggregate statistics.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`,
//!   rounding half-to-even
//! - **Per-row error isolation**: malformed rows are dropped, counted, and
//!   logged; one bad row never aborts the run
//! - **Immutable stages**: each stage owns its output and hands it off by
//!   value; no shared mutable state
//! - **Deterministic output**: records keep their input order; statistics
//!   depend only on the multiset of amounts
//!
//! ## Example
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use std::io::Cursor;
//! use std::str::FromStr;
//! use tax_report::ReportEngine;
//!
//! let csv = "id,amount\nA,100\nB,50\n";
//! let rate = Decimal::from_str("0.19").unwrap();
//! let mut engine = ReportEngine::new(rate, "sales.csv");
//! engine.process_csv(Cursor::new(csv), true).unwrap();
//! engine.into_report().write_json(std::io::stdout()).unwrap();
//! ```

pub mod amount;
pub mod config;
pub mod error;
pub mod record;
pub mod report;
pub mod stats;

pub use amount::Amount;
pub use config::Config;
pub use error::{ReportError, Result};
pub use record::{DerivedRecord, Record, RowDefect};
pub use report::{DefectCounts, Metadata, Report, ReportEngine};
pub use stats::Statistics;
