//! Moving Average Convergence Divergence (MACD).
//!
//! Three lines (separate Indicator instances):
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal)
//! - Histogram: line - signal
//!
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal and histogram.

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::Bar;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    fn with_line(fast: usize, slow: usize, signal: usize, line: MacdLine, name: &str) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be below the slow period");
        Self {
            fast,
            slow,
            signal,
            line,
            name: name.to_string(),
        }
    }

    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Line, "macd")
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Signal, "macd_signal")
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Histogram, "macd_hist")
    }

    /// All three lines computed from one pass over the closes.
    pub fn compute_all(fast: usize, slow: usize, signal: usize, bars: &[Bar]) -> MacdSeries {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast_ema = ema_of_series(&closes, fast);
        let slow_ema = ema_of_series(&closes, slow);

        let line: Vec<f64> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(f, s)| f - s)
            .collect();
        let signal_line = ema_of_series(&line, signal);
        let histogram = line
            .iter()
            .zip(&signal_line)
            .map(|(l, s)| l - s)
            .collect();

        MacdSeries {
            line,
            signal: signal_line,
            histogram,
        }
    }
}

/// The three MACD output series, each the length of the input.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Line => self.slow - 1,
            MacdLine::Signal | MacdLine::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let all = Self::compute_all(self.fast, self.slow, self.signal, bars);
        match self.line {
            MacdLine::Line => all.line,
            MacdLine::Signal => all.signal,
            MacdLine::Histogram => all.histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn ramp(n: usize) -> Vec<Bar> {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        make_bars(&closes)
    }

    #[test]
    fn warmup_lengths_match_lookback() {
        let bars = ramp(60);
        for macd in [
            Macd::line(12, 26, 9),
            Macd::signal(12, 26, 9),
            Macd::histogram(12, 26, 9),
        ] {
            let values = macd.compute(&bars);
            let leading = values.iter().take_while(|v| v.is_nan()).count();
            assert_eq!(leading, macd.lookback(), "{}", macd.name());
            assert!(values[leading..].iter().all(|v| !v.is_nan()));
        }
        assert_eq!(Macd::line(12, 26, 9).lookback(), 25);
        assert_eq!(Macd::signal(12, 26, 9).lookback(), 33);
    }

    #[test]
    fn constant_prices_give_zero_macd() {
        let bars = make_bars(&[50.0; 40]);
        let all = Macd::compute_all(3, 6, 4, &bars);
        assert_approx(all.line[5], 0.0, DEFAULT_EPSILON);
        assert_approx(all.signal[8], 0.0, DEFAULT_EPSILON);
        assert_approx(all.histogram[39], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn line_is_fast_minus_slow() {
        let bars = ramp(30);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, 3);
        let slow = ema_of_series(&closes, 6);
        let line = Macd::line(3, 6, 4).compute(&bars);
        for i in 5..30 {
            assert_approx(line[i], fast[i] - slow[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rising_prices_give_positive_macd() {
        let line = Macd::line(12, 26, 9).compute(&ramp(40));
        assert!(line[30] > 0.0);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let bars = ramp(50);
        let all = Macd::compute_all(12, 26, 9, &bars);
        for i in 33..50 {
            assert_approx(all.histogram[i], all.line[i] - all.signal[i], DEFAULT_EPSILON);
        }
    }
}
