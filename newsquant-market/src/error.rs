//! Errors surfaced by [`crate::StockAnalyzer`].

use chrono::NaiveDate;
use thiserror::Error;

/// Every failure carries the ticker and, where relevant, the date range.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invalid date range for '{ticker}' ({start} .. {end}): {reason}")]
    InvalidRange {
        ticker: String,
        start: String,
        end: String,
        reason: String,
    },

    #[error("no price data for '{ticker}' between {start} and {end}: {reason}")]
    DataUnavailable {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    #[error("not enough data for '{ticker}': {rows} rows, indicators need at least {required}")]
    InsufficientData {
        ticker: String,
        rows: usize,
        required: usize,
    },

    #[error("invalid price series for '{ticker}': {reason}")]
    InvalidSeries { ticker: String, reason: String },

    #[error("invalid indicator config: {0}")]
    InvalidConfig(String),

    #[error("export failed: {0}")]
    Export(String),
}
