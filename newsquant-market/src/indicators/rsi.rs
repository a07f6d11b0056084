//! Relative Strength Index with Wilder smoothing.
//!
//! The first value sits at row `period`: the plain mean of the first `period`
//! close-to-close gains and losses. Later rows update both averages with
//! `avg += (x - avg) / period`.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), so no losses → 100,
//! no gains → 0, and a flat window → 50.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        rsi_of_series(&closes, self.period)
    }
}

/// Wilder RSI over a raw series. A NaN input ends the output at that point.
pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let split = |delta: f64| (delta.max(0.0), (-delta).max(0.0));
    let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

    let seed = &deltas[..period];
    if seed.iter().any(|d| d.is_nan()) {
        return out;
    }
    let n = period as f64;
    let (mut avg_gain, mut avg_loss) = seed
        .iter()
        .map(|&d| split(d))
        .fold((0.0, 0.0), |(g, l), (dg, dl)| (g + dg, l + dl));
    avg_gain /= n;
    avg_loss /= n;
    out[period] = strength_index(avg_gain, avg_loss);

    for (row, &delta) in deltas.iter().enumerate().skip(period).map(|(i, d)| (i + 1, d)) {
        if delta.is_nan() {
            break;
        }
        let (gain, loss) = split(delta);
        avg_gain += (gain - avg_gain) / n;
        avg_loss += (loss - avg_loss) / n;
        out[row] = strength_index(avg_gain, avg_loss);
    }

    out
}

fn strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    match (avg_gain == 0.0, avg_loss == 0.0) {
        (true, true) => 50.0,
        (false, true) => 100.0,
        (true, false) => 0.0,
        (false, false) => (100.0 - 100.0 / (1.0 + avg_gain / avg_loss)).clamp(0.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn warmup_is_period_rows() {
        let result = rsi_of_series(&[10.0, 11.0, 10.5, 11.5, 12.0, 11.0], 4);
        assert_eq!(result.iter().take_while(|v| v.is_nan()).count(), 4);
        assert!(result[4..].iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn rising_series_is_100_and_falling_is_0() {
        let up: Vec<f64> = (0..8).map(|i| 20.0 + i as f64).collect();
        let down: Vec<f64> = up.iter().rev().copied().collect();
        assert_approx(rsi_of_series(&up, 5)[7], 100.0, DEFAULT_EPSILON);
        assert_approx(rsi_of_series(&down, 5)[5], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn flat_series_is_50() {
        let result = rsi_of_series(&[7.0; 10], 4);
        assert!(result[4..].iter().all(|&v| v == 50.0));
    }

    #[test]
    fn seed_then_wilder_step() {
        // deltas: +2, -1, +1, -2
        let closes = [50.0, 52.0, 51.0, 52.0, 50.0];
        let result = rsi_of_series(&closes, 3);

        // seed: gains 3/3, losses 1/3
        let (g, l) = (1.0, 1.0 / 3.0);
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + g / l), DEFAULT_EPSILON);

        // step with delta -2
        let g2 = g + (0.0 - g) / 3.0;
        let l2 = l + (2.0 - l) / 3.0;
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + g2 / l2), DEFAULT_EPSILON);
    }

    #[test]
    fn stays_in_bounds_on_whipsaw() {
        let closes = [30.0, 45.0, 20.0, 60.0, 15.0, 70.0, 10.0, 80.0, 5.0];
        for v in rsi_of_series(&closes, 2).into_iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn nan_in_seed_gives_no_values() {
        let result = rsi_of_series(&[1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0], 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nan_after_seed_stops_output() {
        let result = rsi_of_series(&[1.0, 2.0, 3.0, 4.0, f64::NAN, 6.0, 7.0], 3);
        assert!(!result[3].is_nan());
        assert!(result[4..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn indicator_uses_closes() {
        let bars = make_bars(&[3.0, 4.0, 5.0, 4.0, 6.0]);
        let rsi = Rsi::new(2);
        assert_eq!(rsi.name(), "rsi_2");
        assert_eq!(rsi.lookback(), 2);
        let direct = rsi_of_series(&[3.0, 4.0, 5.0, 4.0, 6.0], 2);
        let via_bars = rsi.compute(&bars);
        for (a, b) in direct.iter().zip(&via_bars) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }
}
