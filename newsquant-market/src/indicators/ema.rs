//! Exponential moving average over a raw series, used by MACD.
//!
//! `alpha = 2 / (period + 1)`. The first value is the plain mean of the first
//! `period` defined inputs; leading NaNs are skipped, so the EMA of an
//! indicator line starts `period - 1` rows after that line does.

/// EMA of `values`, one output per input.
///
/// A NaN inside the seed window leaves the whole output NaN; a NaN after the
/// seed ends the output at that row.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 {
        return out;
    }

    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return out;
    };
    let Some(seed_window) = values.get(start..start + period) else {
        return out;
    };
    if seed_window.iter().any(|v| v.is_nan()) {
        return out;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed_row = start + period - 1;
    let mut ema = seed_window.iter().sum::<f64>() / period as f64;
    out[seed_row] = ema;

    for (slot, &x) in out[seed_row + 1..].iter_mut().zip(&values[seed_row + 1..]) {
        if x.is_nan() {
            break;
        }
        ema += alpha * (x - ema);
        *slot = ema;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn period_one_tracks_input() {
        let values = [3.0, 9.0, 4.0];
        let result = ema_of_series(&values, 1);
        for (r, v) in result.iter().zip(values) {
            assert_approx(*r, v, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn seeded_with_mean_then_smoothed() {
        // alpha = 0.5; seed = mean(2, 4, 6) = 4
        let result = ema_of_series(&[2.0, 4.0, 6.0, 10.0, 0.0], 3);
        assert!(result[0].is_nan() && result[1].is_nan());
        assert_approx(result[2], 4.0, DEFAULT_EPSILON);
        assert_approx(result[3], 7.0, DEFAULT_EPSILON);
        assert_approx(result[4], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn skips_leading_missing_values() {
        let result = ema_of_series(&[f64::NAN, f64::NAN, f64::NAN, 1.0, 3.0, 5.0], 2);
        assert_eq!(result.iter().take_while(|v| v.is_nan()).count(), 4);
        assert_approx(result[4], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn missing_value_in_seed_gives_nothing() {
        let result = ema_of_series(&[1.0, f64::NAN, 3.0, 4.0], 2);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn missing_value_after_seed_ends_output() {
        let result = ema_of_series(&[1.0, 3.0, 5.0, f64::NAN, 7.0], 2);
        assert_approx(result[2], 4.0, DEFAULT_EPSILON);
        assert!(result[3].is_nan() && result[4].is_nan());
    }

    #[test]
    fn too_short_for_seed() {
        assert!(ema_of_series(&[1.0, 2.0], 3).iter().all(|v| v.is_nan()));
    }
}
