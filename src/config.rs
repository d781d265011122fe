//! Command-line configuration for the report pipeline.

use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Applies a tax rate to tabular sales records and emits a JSON report
/// with aggregate statistics.
#[derive(Debug, Parser)]
#[command(name = "tax-report", version, about)]
pub struct Config {
    /// Input CSV file (columns: id, amount)
    pub input: PathBuf,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tax rate applied to every record (not clamped)
    #[arg(short, long, default_value = "0.19", allow_negative_numbers = true)]
    pub rate: Decimal,

    /// Source label recorded in the report metadata [default: the input path]
    #[arg(short, long)]
    pub label: Option<String>,

    /// Treat the first row as data rather than a header
    #[arg(long)]
    pub no_header: bool,
}

impl Config {
    /// The source label for report metadata, falling back to the input path.
    pub fn source_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.input.display().to_string(),
        }
    }

    /// Whether the input carries a leading header row.
    pub fn has_headers(&self) -> bool {
        !self.no_header
    }
}
