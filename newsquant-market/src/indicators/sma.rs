//! Simple moving average of close.
//!
//! First value at row `period - 1`. A window containing NaN yields NaN.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        sma_of_series(&closes, self.period)
    }
}

/// Rolling mean of a raw series, one output per input.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    // Running sum over the finite values in the window, plus how many NaNs it holds
    let mut window_sum = 0.0;
    let mut nans_in_window = 0usize;

    for (row, &entering) in values.iter().enumerate() {
        if entering.is_nan() {
            nans_in_window += 1;
        } else {
            window_sum += entering;
        }
        if let Some(leaving) = row.checked_sub(period).map(|i| values[i]) {
            if leaving.is_nan() {
                nans_in_window -= 1;
            } else {
                window_sum -= leaving;
            }
        }
        if row + 1 >= period && nans_in_window == 0 {
            out[row] = window_sum / period as f64;
        }
    }

    out
}
