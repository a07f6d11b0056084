//! NewsQuant Market: price history loading and technical indicators.
//!
//! This crate holds the market side of the pipeline:
//! - Domain type for daily bars
//! - Price providers (Yahoo Finance, CSV directory, in-memory) with retry
//! - Ingest normalization (sort, dedup, drop void rows, clip to range)
//! - Indicators (SMA, Wilder RSI, EMA, MACD line/signal/histogram)
//! - `StockAnalyzer`, which owns one ticker's table and enriches it
//! - Polars / Parquet export of the enriched table

pub mod analyzer;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod series;

pub use analyzer::{AnalyzerPhase, StockAnalyzer};
pub use config::{ConfigError, FetchConfig, IndicatorConfig, MarketConfig};
pub use domain::Bar;
pub use error::AnalyzerError;
pub use series::{IndicatorColumn, PriceSeries};
