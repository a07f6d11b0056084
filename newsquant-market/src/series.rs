//! PriceSeries: the analyzer's working table.
//!
//! Rows are bars keyed by trading date (strictly increasing). Indicator columns
//! are appended by name and hold one `Option<f64>` per row; `None` marks a
//! value that is undefined for that row (warmup), never zero.

use crate::domain::Bar;
use crate::error::AnalyzerError;
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// A named, nullable indicator column.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorColumn {
    /// Number of leading rows without a value.
    pub fn missing_prefix(&self) -> usize {
        self.values.iter().take_while(|v| v.is_none()).count()
    }
}

/// Price history for one ticker plus derived indicator columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<Bar>,
    columns: Vec<IndicatorColumn>,
}

impl PriceSeries {
    /// Build a series from bars that are already in strictly increasing date order.
    pub fn new(ticker: impl Into<String>, bars: Vec<Bar>) -> Result<Self, AnalyzerError> {
        let ticker = ticker.into();
        if let Some(pos) = bars.windows(2).position(|w| w[0].date >= w[1].date) {
            return Err(AnalyzerError::InvalidSeries {
                reason: format!(
                    "dates must be strictly increasing ({} followed by {})",
                    bars[pos].date,
                    bars[pos + 1].date
                ),
                ticker,
            });
        }
        Ok(Self {
            ticker,
            bars,
            columns: Vec::new(),
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Indicator columns in the order they were first added.
    pub fn columns(&self) -> &[IndicatorColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Values of a named indicator column.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Attach a column. A column with the same name is replaced in place.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), AnalyzerError> {
        let name = name.into();
        if values.len() != self.bars.len() {
            return Err(AnalyzerError::InvalidSeries {
                ticker: self.ticker.clone(),
                reason: format!(
                    "column '{name}' has {} values for {} rows",
                    values.len(),
                    self.bars.len()
                ),
            });
        }

        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.columns.push(IndicatorColumn { name, values }),
        }
        Ok(())
    }

    /// Detach a column by name, returning it if present.
    pub fn remove_column(&mut self, name: &str) -> Option<IndicatorColumn> {
        let pos = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(pos))
    }

    /// Export as a polars DataFrame: date, OHLCV, then indicator columns (nulls for missing).
    pub fn to_dataframe(&self) -> Result<DataFrame, AnalyzerError> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .ok_or_else(|| AnalyzerError::Export("epoch date".into()))?;
        let dates: Vec<i32> = self
            .bars
            .iter()
            .map(|b| (b.date - epoch).num_days() as i32)
            .collect();
        let opens: Vec<f64> = self.bars.iter().map(|b| b.open).collect();
        let highs: Vec<f64> = self.bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = self.bars.iter().map(|b| b.low).collect();
        let closes: Vec<f64> = self.bars.iter().map(|b| b.close).collect();
        let volumes: Vec<u64> = self.bars.iter().map(|b| b.volume).collect();

        let mut columns = vec![
            Column::new("date".into(), dates)
                .cast(&DataType::Date)
                .map_err(|e| AnalyzerError::Export(format!("date cast: {e}")))?,
            Column::new("open".into(), opens),
            Column::new("high".into(), highs),
            Column::new("low".into(), lows),
            Column::new("close".into(), closes),
            Column::new("volume".into(), volumes),
        ];
        for column in &self.columns {
            columns.push(Column::new(column.name.as_str().into(), column.values.clone()));
        }

        DataFrame::new(columns)
            .map_err(|e| AnalyzerError::Export(format!("dataframe creation: {e}")))
    }

    /// Write the table to a Parquet file.
    pub fn write_parquet(&self, path: &Path) -> Result<(), AnalyzerError> {
        let mut df = self.to_dataframe()?;
        let file = fs::File::create(path)
            .map_err(|e| AnalyzerError::Export(format!("create {}: {e}", path.display())))?;
        ParquetWriter::new(file)
            .finish(&mut df)
            .map_err(|e| AnalyzerError::Export(format!("write parquet: {e}")))?;
        Ok(())
    }
}
