//! Error types for the report pipeline.
//!
//! Only the I/O boundary can fail the run; per-row defects live in
//! [`crate::record::RowDefect`] and never surface here.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Fatal errors that can abort a report run.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to open or read the input file, or write the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Report serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
