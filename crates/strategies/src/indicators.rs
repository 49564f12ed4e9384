// In crates/strategies/src/indicators.rs

//! Stateless indicator functions over a daily price series.
//!
//! Every function reads the most recent value only. Window statistics that
//! cannot be formed from the available history return `None`; ADX returns 0.

use core_types::PriceBar;
use ta::Next;
use ta::indicators::{Maximum, Minimum, SimpleMovingAverage as Sma};

/// The last `window` values of a series, if there are that many.
fn trailing(values: &[f64], window: usize) -> Option<&[f64]> {
    if window == 0 || values.len() < window {
        return None;
    }
    Some(&values[values.len() - window..])
}

/// True range per bar. The first bar has no previous close, so its range is
/// plain high - low.
pub fn true_range(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let range = bar.high - bar.low;
            if i == 0 {
                return range;
            }
            let prev_close = bars[i - 1].close;
            range
                .max((bar.high - prev_close).abs())
                .max((bar.low - prev_close).abs())
        })
        .collect()
}

/// Wilder smoothing: exponential with alpha = 1/window, seeded on the first
/// observation and without bias adjustment.
fn wilder_smooth(values: &[f64], window: usize) -> Vec<f64> {
    let alpha = 1.0 / window as f64;
    let mut smoothed = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => (1.0 - alpha) * p + alpha * value,
        };
        smoothed.push(next);
        prev = Some(next);
    }
    smoothed
}

/// Average True Range: the simple mean of the last `window` true ranges.
///
/// Needs `window + 1` bars so that every averaged range has a previous close.
pub fn atr(bars: &[PriceBar], window: usize) -> Option<f64> {
    if window == 0 || bars.len() < window + 1 {
        return None;
    }
    let ranges = true_range(bars);
    trailing(&ranges, window).map(|tail| tail.iter().sum::<f64>() / window as f64)
}

/// Average Directional Index over `window`.
///
/// Returns exactly 0.0 when fewer than `2 * window` bars are available,
/// whatever the price pattern.
pub fn adx(bars: &[PriceBar], window: usize) -> f64 {
    if window == 0 || bars.len() < window * 2 {
        return 0.0;
    }

    let smoothed_tr = wilder_smooth(&true_range(bars), window);

    // Directional moves start at the second bar.
    let (plus_dm, minus_dm): (Vec<f64>, Vec<f64>) = bars
        .windows(2)
        .map(|pair| {
            let up = pair[1].high - pair[0].high;
            let down = pair[0].low - pair[1].low;
            (up.max(0.0), down.max(0.0))
        })
        .unzip();
    let smoothed_plus = wilder_smooth(&plus_dm, window);
    let smoothed_minus = wilder_smooth(&minus_dm, window);

    let dx: Vec<f64> = smoothed_plus
        .iter()
        .zip(&smoothed_minus)
        .enumerate()
        .map(|(k, (plus, minus))| {
            let atr = smoothed_tr[k + 1];
            if atr <= 0.0 {
                return 0.0;
            }
            let plus_di = 100.0 * plus / atr;
            let minus_di = 100.0 * minus / atr;
            let sum = plus_di + minus_di;
            if sum > 0.0 {
                100.0 * (plus_di - minus_di).abs() / sum
            } else {
                0.0
            }
        })
        .collect();

    wilder_smooth(&dx, window).last().copied().unwrap_or(0.0)
}

/// Simple moving average of the last `window` values.
pub fn sma(values: &[f64], window: usize) -> Option<f64> {
    let tail = trailing(values, window)?;
    let mut sma = Sma::new(window).ok()?;
    tail.iter().fold(None, |_, value| Some(sma.next(*value)))
}

/// Sample standard deviation (n - 1 denominator) of the last `window` values.
pub fn rolling_std(values: &[f64], window: usize) -> Option<f64> {
    if window < 2 {
        return None;
    }
    let tail = trailing(values, window)?;
    let mean = tail.iter().sum::<f64>() / window as f64;
    let variance = tail.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
    Some(variance.sqrt())
}

/// Highest high of the `window` bars before the latest one.
///
/// The latest bar is the one whose close is being compared against the
/// channel, so it must never contribute to it.
pub fn prior_high(bars: &[PriceBar], window: usize) -> Option<f64> {
    let (_, history) = bars.split_last()?;
    let highs: Vec<f64> = history.iter().map(|bar| bar.high).collect();
    let tail = trailing(&highs, window)?;
    let mut max = Maximum::new(window).ok()?;
    tail.iter().fold(None, |_, high| Some(max.next(*high)))
}

/// Lowest low of the `window` bars before the latest one.
pub fn prior_low(bars: &[PriceBar], window: usize) -> Option<f64> {
    let (_, history) = bars.split_last()?;
    let lows: Vec<f64> = history.iter().map(|bar| bar.low).collect();
    let tail = trailing(&lows, window)?;
    let mut min = Minimum::new(window).ok()?;
    tail.iter().fold(None, |_, low| Some(min.next(*low)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn bar(day: usize, high: f64, low: f64, close: f64) -> PriceBar {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(day as u64);
        PriceBar {
            date,
            open: close,
            high,
            low,
            close,
        }
    }

    /// A steady uptrend: close rises by `step` a bar with a +/- `half_range` band.
    pub(crate) fn uptrend(n: usize, start: f64, step: f64, half_range: f64) -> Vec<PriceBar> {
        (0..n)
            .map(|i| {
                let close = start + step * i as f64;
                bar(i, close + half_range, close - half_range, close)
            })
            .collect()
    }

    fn zigzag(n: usize) -> Vec<PriceBar> {
        (0..n)
            .map(|i| {
                let close = if i % 2 == 0 { 100.0 } else { 102.0 };
                bar(i, close + 1.0, close - 1.0, close)
            })
            .collect()
    }

    #[test]
    fn atr_needs_window_plus_one_bars() {
        let bars = uptrend(14, 100.0, 0.0, 1.0);
        assert_eq!(atr(&bars, 14), None);

        let bars = uptrend(15, 100.0, 0.0, 1.0);
        assert_eq!(atr(&bars, 14), Some(2.0));
    }

    #[test]
    fn atr_uses_previous_close_gaps() {
        // Flat 2-wide bars, then a gap up of 10 on the last bar.
        let mut bars = uptrend(20, 100.0, 0.0, 1.0);
        bars.push(bar(20, 111.0, 109.0, 110.0));

        // Last true range is |111 - 100| = 11, the other 13 are 2.
        let expected = (11.0 + 13.0 * 2.0) / 14.0;
        let value = atr(&bars, 14).unwrap();
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn atr_ignores_first_bar_without_previous_close() {
        let mut bars = vec![bar(0, 500.0, 1.0, 100.0)];
        bars.extend((1..15).map(|i| bar(i, 100.5, 99.5, 100.0)));
        assert_eq!(atr(&bars, 14), Some(1.0));
    }

    #[test]
    fn adx_is_zero_below_twice_the_window() {
        let bars = uptrend(27, 100.0, 1.0, 3.0);
        assert_eq!(adx(&bars, 14), 0.0);

        let bars = uptrend(28, 100.0, 1.0, 3.0);
        assert!(adx(&bars, 14) > 0.0);
    }

    #[test]
    fn adx_is_high_in_a_clean_trend() {
        let bars = uptrend(120, 100.0, 1.0, 3.0);
        let value = adx(&bars, 14);
        assert!(value > 90.0, "adx was {value}");
        assert!(value <= 100.0 + 1e-9);
    }

    #[test]
    fn adx_is_low_in_a_range() {
        let bars = zigzag(200);
        let value = adx(&bars, 14);
        assert!(value < 25.0, "adx was {value}");
    }

    #[test]
    fn sma_and_std_use_trailing_window() {
        let values = [100.0, 2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(sma(&values, 8), Some(5.0));
        let std = rolling_std(&values, 8).unwrap();
        assert!((std - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);

        assert_eq!(sma(&values, 10), None);
        assert_eq!(rolling_std(&values, 1), None);
    }

    #[test]
    fn prior_high_excludes_the_latest_bar() {
        let mut bars = uptrend(30, 100.0, 0.0, 5.0);
        // The latest bar is itself a new high.
        bars.push(bar(30, 200.0, 150.0, 190.0));

        assert_eq!(prior_high(&bars, 20), Some(105.0));
    }

    #[test]
    fn prior_low_excludes_the_latest_bar() {
        let mut bars = uptrend(30, 100.0, 0.0, 5.0);
        bars.push(bar(30, 60.0, 10.0, 20.0));

        assert_eq!(prior_low(&bars, 20), Some(95.0));
    }

    #[test]
    fn prior_extremes_need_window_plus_one_bars() {
        let bars = uptrend(20, 100.0, 1.0, 1.0);
        assert_eq!(prior_high(&bars, 20), None);
        assert_eq!(prior_low(&bars, 20), None);

        let bars = uptrend(21, 100.0, 1.0, 1.0);
        // Bars 0..=19 form the channel; bar 19 closes at 119.
        assert_eq!(prior_high(&bars, 20), Some(120.0));
        assert_eq!(prior_low(&bars, 20), Some(99.0));
    }
}
