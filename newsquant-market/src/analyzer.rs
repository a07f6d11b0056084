//! StockAnalyzer: loads one ticker's price history and enriches it with indicators.
//!
//! The lifecycle is explicit: an analyzer only exists once its data is loaded
//! ([`AnalyzerPhase::Loaded`]); `add_indicators` moves it to
//! [`AnalyzerPhase::Enriched`]. The analyzer owns its working table and never
//! re-fetches.

use crate::config::IndicatorConfig;
use crate::data::{ingest, PriceProvider};
use crate::error::AnalyzerError;
use crate::indicators::{to_column, Indicator, Macd, Rsi, Sma};
use crate::series::PriceSeries;
use chrono::NaiveDate;

/// Where the analyzer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerPhase {
    /// Price history is loaded, no indicators yet.
    Loaded,
    /// Indicator columns have been added.
    Enriched,
}

/// Price history plus indicators for one ticker.
#[derive(Debug, Clone)]
pub struct StockAnalyzer {
    series: PriceSeries,
    phase: AnalyzerPhase,
    /// Columns written by the last `add_indicators` run.
    written: Vec<String>,
}

impl StockAnalyzer {
    /// Load `[start_date, end_date]` for `ticker`, with dates given as `YYYY-MM-DD`.
    pub fn initialize(
        provider: &dyn PriceProvider,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self, AnalyzerError> {
        let invalid = |reason: String| AnalyzerError::InvalidRange {
            ticker: ticker.to_string(),
            start: start_date.to_string(),
            end: end_date.to_string(),
            reason,
        };

        let start = parse_date(start_date).map_err(|e| invalid(format!("start date: {e}")))?;
        let end = parse_date(end_date).map_err(|e| invalid(format!("end date: {e}")))?;

        Self::load(provider, ticker, start, end)
    }

    /// Load `[start, end]` for `ticker` from `provider`.
    pub fn load(
        provider: &dyn PriceProvider,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, AnalyzerError> {
        let ticker = ticker.trim();
        let invalid = |reason: &str| AnalyzerError::InvalidRange {
            ticker: ticker.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            reason: reason.to_string(),
        };
        if ticker.is_empty() {
            return Err(invalid("ticker is empty"));
        }
        if start >= end {
            return Err(invalid("start date must be before end date"));
        }

        let unavailable = |reason: String| AnalyzerError::DataUnavailable {
            ticker: ticker.to_string(),
            start,
            end,
            reason,
        };

        let fetched = provider
            .fetch(ticker, start, end)
            .map_err(|e| unavailable(format!("{} fetch failed: {e}", provider.name())))?;

        let ingested = ingest(fetched.bars, start, end);
        if ingested.dropped() > 0 {
            tracing::warn!(
                ticker,
                void = ingested.dropped_void,
                missing_close = ingested.dropped_missing_close,
                out_of_range = ingested.dropped_out_of_range,
                duplicates = ingested.dropped_duplicates,
                "dropped rows during ingest"
            );
        }
        if ingested.suspicious > 0 {
            tracing::warn!(
                ticker,
                suspicious = ingested.suspicious,
                "kept bars with inconsistent OHLC values"
            );
        }
        if ingested.bars.is_empty() {
            return Err(unavailable(format!("{} returned no rows", provider.name())));
        }

        let series = PriceSeries::new(ticker, ingested.bars)?;
        tracing::info!(
            ticker,
            rows = series.len(),
            source = ?fetched.source,
            "loaded price history"
        );

        Ok(Self {
            series,
            phase: AnalyzerPhase::Loaded,
            written: Vec::new(),
        })
    }

    /// Wrap an already-built series (fixtures, offline data).
    pub fn from_series(series: PriceSeries) -> Result<Self, AnalyzerError> {
        if series.is_empty() {
            return Err(AnalyzerError::InvalidSeries {
                ticker: series.ticker().to_string(),
                reason: "series has no rows".into(),
            });
        }
        let phase = if series.columns().is_empty() {
            AnalyzerPhase::Loaded
        } else {
            AnalyzerPhase::Enriched
        };
        // Existing columns are treated as a previous enrichment.
        let written = series.column_names().into_iter().map(String::from).collect();
        Ok(Self {
            series,
            phase,
            written,
        })
    }

    pub fn ticker(&self) -> &str {
        self.series.ticker()
    }

    pub fn phase(&self) -> AnalyzerPhase {
        self.phase
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn into_series(self) -> PriceSeries {
        self.series
    }

    /// Append SMA, RSI and MACD (line, signal, histogram) columns.
    ///
    /// Row count, order and dates are left untouched. Running it again
    /// replaces every column the previous run wrote, including ones whose
    /// names changed with the windows.
    pub fn add_indicators(
        &mut self,
        config: &IndicatorConfig,
    ) -> Result<&PriceSeries, AnalyzerError> {
        config.validate().map_err(AnalyzerError::InvalidConfig)?;

        let rows = self.series.len();
        let required = config.largest_window();
        if rows < required {
            return Err(AnalyzerError::InsufficientData {
                ticker: self.series.ticker().to_string(),
                rows,
                required,
            });
        }

        let indicators = indicator_set(config);
        let computed: Vec<(String, Vec<Option<f64>>)> = indicators
            .iter()
            .map(|ind| (ind.name().to_string(), to_column(ind.compute(self.series.bars()))))
            .collect();

        for stale in self.written.drain(..) {
            self.series.remove_column(&stale);
        }
        for (name, values) in computed {
            self.series.set_column(name.clone(), values)?;
            if !self.written.contains(&name) {
                self.written.push(name);
            }
        }

        tracing::debug!(
            ticker = self.series.ticker(),
            columns = ?self.series.column_names(),
            "added indicator columns"
        );

        self.phase = AnalyzerPhase::Enriched;
        Ok(&self.series)
    }
}

/// Indicators for one `add_indicators` run, in column order.
fn indicator_set(config: &IndicatorConfig) -> Vec<Box<dyn Indicator>> {
    let mut set: Vec<Box<dyn Indicator>> = vec![Box::new(Sma::new(config.sma_window))];
    if let Some(long) = config.sma_long_window {
        set.push(Box::new(Sma::new(long)));
    }
    set.push(Box::new(Rsi::new(config.rsi_window)));

    let (fast, slow, signal) = (config.macd_fast, config.macd_slow, config.macd_signal);
    set.push(Box::new(Macd::line(fast, slow, signal)));
    set.push(Box::new(Macd::signal(fast, slow, signal)));
    set.push(Box::new(Macd::histogram(fast, slow, signal)));
    set
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
}
