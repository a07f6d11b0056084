//! CSV import provider.
//!
//! Reads `{dir}/{SYMBOL}.csv` with the header `date,open,high,low,close,volume`.
//! Empty cells are treated as missing values.

use super::provider::{DataSource, FetchResult, PriceProvider, ProviderError};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

/// Offline provider backed by one CSV file per symbol.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

impl PriceProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, ProviderError> {
        let path = self.symbol_path(symbol);
        if !path.exists() {
            return Err(ProviderError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| ProviderError::Parse(format!("{}: {e}", path.display())))?;

        let mut bars = Vec::new();
        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| {
                ProviderError::Parse(format!("{} row {}: {e}", path.display(), line + 1))
            })?;
            if row.date < start || row.date > end {
                continue;
            }
            bars.push(Bar {
                date: row.date,
                open: row.open.unwrap_or(f64::NAN),
                high: row.high.unwrap_or(f64::NAN),
                low: row.low.unwrap_or(f64::NAN),
                close: row.close.unwrap_or(f64::NAN),
                volume: row.volume.map(|v| v.max(0.0) as u64).unwrap_or(0),
            });
        }

        tracing::debug!(symbol, rows = bars.len(), path = %path.display(), "read CSV prices");

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn reads_rows_within_range() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("AAPL.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-02,185.0,186.0,183.0,185.5,1000\n\
             2024-01-03,184.0,185.0,182.0,184.2,1100\n\
             2024-01-04,182.0,183.0,180.0,,1200\n\
             2024-01-05,181.0,182.5,180.5,181.9,900\n",
        )
        .unwrap();

        let provider = CsvProvider::new(dir.path());
        let result = provider.fetch("AAPL", date(1, 3), date(1, 4)).unwrap();

        assert_eq!(result.source, DataSource::CsvImport);
        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.bars[0].date, date(1, 3));
        assert_eq!(result.bars[0].volume, 1100);
        assert!(result.bars[1].close.is_nan());
    }

    #[test]
    fn missing_file_is_symbol_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("NONE", date(1, 1), date(1, 31)).unwrap_err();
        assert!(matches!(err, ProviderError::SymbolNotFound { .. }));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("BAD.csv"),
            "date,open,high,low,close,volume\nnot-a-date,1,1,1,1,1\n",
        )
        .unwrap();

        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("BAD", date(1, 1), date(1, 31)).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
