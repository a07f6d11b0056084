//! Ingest pipeline: raw provider bars → clean, ordered price history.
//!
//! Steps, in order:
//! 1. drop void bars (every price missing)
//! 2. drop bars without a finite close
//! 3. drop bars outside the requested `[start, end]`
//! 4. sort ascending by date, keeping the first bar seen for a duplicated date
//!
//! Bars failing the OHLC sanity check are kept but counted in `suspicious`.

use crate::domain::Bar;
use chrono::NaiveDate;

/// Outcome of an ingest pass, with counts of what was dropped and why.
#[derive(Debug, Clone, Default)]
pub struct IngestResult {
    pub bars: Vec<Bar>,
    pub dropped_void: usize,
    pub dropped_missing_close: usize,
    pub dropped_out_of_range: usize,
    pub dropped_duplicates: usize,
    /// Kept bars whose OHLC values are inconsistent or partially missing.
    pub suspicious: usize,
}

impl IngestResult {
    pub fn dropped(&self) -> usize {
        self.dropped_void
            + self.dropped_missing_close
            + self.dropped_out_of_range
            + self.dropped_duplicates
    }
}

/// Normalize raw bars for `[start, end]`.
pub fn ingest(raw: Vec<Bar>, start: NaiveDate, end: NaiveDate) -> IngestResult {
    let mut result = IngestResult::default();
    let mut kept = Vec::with_capacity(raw.len());

    for bar in raw {
        if bar.is_void() {
            result.dropped_void += 1;
        } else if !bar.has_close() {
            result.dropped_missing_close += 1;
        } else if bar.date < start || bar.date > end {
            result.dropped_out_of_range += 1;
        } else {
            kept.push(bar);
        }
    }

    // Stable sort keeps provider order among equal dates, so dedup keeps the first.
    kept.sort_by_key(|b| b.date);
    let before = kept.len();
    kept.dedup_by_key(|b| b.date);
    result.dropped_duplicates = before - kept.len();
    result.suspicious = kept.iter().filter(|b| !b.is_sane()).count();

    result.bars = kept;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> Bar {
        Bar::new(day(d), close, close + 1.0, close - 1.0, close, 100)
    }

    #[test]
    fn sorts_and_dedups_keeping_first() {
        let raw = vec![bar(3, 30.0), bar(1, 10.0), bar(3, 99.0), bar(2, 20.0)];
        let result = ingest(raw, day(1), day(31));

        let dates: Vec<_> = result.bars.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(result.bars[2].close, 30.0);
        assert_eq!(result.dropped_duplicates, 1);
    }

    #[test]
    fn drops_void_missing_close_and_out_of_range() {
        let mut void = bar(2, 0.0);
        void.open = f64::NAN;
        void.high = f64::NAN;
        void.low = f64::NAN;
        void.close = f64::NAN;

        let mut no_close = bar(3, 5.0);
        no_close.close = f64::NAN;

        let raw = vec![bar(1, 1.0), void, no_close, bar(4, 4.0), bar(20, 9.0)];
        let result = ingest(raw, day(1), day(10));

        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.dropped_void, 1);
        assert_eq!(result.dropped_missing_close, 1);
        assert_eq!(result.dropped_out_of_range, 1);
        assert_eq!(result.dropped(), 3);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let raw = vec![bar(1, 1.0), bar(5, 5.0), bar(6, 6.0)];
        let result = ingest(raw, day(1), day(5));
        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.bars[1].date, day(5));
    }

    #[test]
    fn inconsistent_bars_are_kept_and_counted() {
        let mut inverted = bar(2, 20.0);
        inverted.high = 10.0;
        let raw = vec![bar(1, 10.0), inverted];
        let result = ingest(raw, day(1), day(5));
        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.suspicious, 1);
        assert_eq!(result.dropped(), 0);
    }
}
