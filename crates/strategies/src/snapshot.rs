// In crates/strategies/src/snapshot.rs

use crate::error::{Error, Result};
use crate::indicators;
use crate::types::{StrategySettings, TurtleWindows};
use core_types::PriceBar;

/// Every indicator reading the regime classifier and the strategies need for
/// one instrument, computed fresh from the latest price window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorSnapshot {
    pub atr_value: f64,
    /// ATR as a percentage of the latest close.
    pub atr_percent: f64,
    /// 0.0 when there is not enough history.
    pub adx: f64,
    /// Long-term trend filter (SMA over `trend.sma_window`).
    pub trend_sma: Option<f64>,
    /// Mean-reversion centre line (SMA over `mean_reversion.window`).
    pub reversion_sma: Option<f64>,
    pub reversion_std: Option<f64>,
    /// Prior highs a squeeze breakout has to clear.
    pub squeeze_high: Option<f64>,
    /// Turtle entry channel top.
    pub entry_high: Option<f64>,
    /// Turtle exit channel bottom.
    pub exit_low: Option<f64>,
}

/// The close of the latest bar, which is the price every rule compares against.
pub fn latest_close(bars: &[PriceBar]) -> Result<f64> {
    let price = bars.last().ok_or(Error::EmptySeries)?.close;
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::InvalidPrice(price));
    }
    Ok(price)
}

impl IndicatorSnapshot {
    pub fn compute(
        bars: &[PriceBar],
        settings: &StrategySettings,
        windows: TurtleWindows,
    ) -> Result<Self> {
        let price = latest_close(bars)?;

        let atr_window = settings.indicators.atr_window;
        let atr_value =
            indicators::atr(bars, atr_window).ok_or(Error::InsufficientHistory {
                required: atr_window + 1,
                available: bars.len(),
            })?;

        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let reversion_window = settings.mean_reversion.window;

        Ok(Self {
            atr_value,
            atr_percent: atr_value / price * 100.0,
            adx: indicators::adx(bars, settings.indicators.adx_window),
            trend_sma: indicators::sma(&closes, settings.trend.sma_window),
            reversion_sma: indicators::sma(&closes, reversion_window),
            reversion_std: indicators::rolling_std(&closes, reversion_window),
            squeeze_high: indicators::prior_high(bars, settings.squeeze.breakout_window),
            entry_high: indicators::prior_high(bars, windows.entry_window),
            exit_low: indicators::prior_low(bars, windows.exit_window),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::tests::{bar, uptrend};

    const WINDOWS: TurtleWindows = TurtleWindows {
        entry_window: 50,
        exit_window: 20,
    };

    #[test]
    fn short_history_leaves_long_windows_undefined() {
        let bars = uptrend(30, 100.0, 1.0, 2.0);
        let snapshot = IndicatorSnapshot::compute(&bars, &StrategySettings::default(), WINDOWS).unwrap();

        assert!(snapshot.adx > 0.0);
        assert_eq!(snapshot.trend_sma, None);
        assert_eq!(snapshot.entry_high, None);
        assert!(snapshot.exit_low.is_some());
        assert!(snapshot.squeeze_high.is_some());
        assert!(snapshot.reversion_sma.is_some());
    }

    #[test]
    fn atr_percent_is_relative_to_latest_close() {
        let bars = uptrend(15, 200.0, 0.0, 1.0);
        let snapshot = IndicatorSnapshot::compute(&bars, &StrategySettings::default(), WINDOWS).unwrap();
        assert_eq!(snapshot.atr_value, 2.0);
        assert!((snapshot.atr_percent - 1.0).abs() < 1e-12);
    }

    #[test]
    fn too_little_history_for_atr_is_an_error() {
        let bars = uptrend(10, 100.0, 1.0, 1.0);
        let err = IndicatorSnapshot::compute(&bars, &StrategySettings::default(), WINDOWS).unwrap_err();
        assert_eq!(err, Error::InsufficientHistory { required: 15, available: 10 });
    }

    #[test]
    fn empty_and_degenerate_series_are_rejected() {
        let settings = StrategySettings::default();
        assert_eq!(IndicatorSnapshot::compute(&[], &settings, WINDOWS), Err(Error::EmptySeries));

        let mut bars = uptrend(20, 100.0, 0.0, 1.0);
        bars.push(bar(20, 1.0, 0.0, 0.0));
        assert_eq!(
            IndicatorSnapshot::compute(&bars, &settings, WINDOWS),
            Err(Error::InvalidPrice(0.0))
        );
    }
}
