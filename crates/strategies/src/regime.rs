// In crates/strategies/src/regime.rs

use crate::snapshot::IndicatorSnapshot;
use crate::types::StrategySettings;
use core_types::Regime;

/// Maps an instrument's indicator readings to exactly one regime.
///
/// Rules are checked in a fixed order and the first match wins:
/// 1. ATR% below the squeeze threshold: `Squeeze`.
/// 2. ADX above the trend threshold and price above the trend SMA: `Turtle`.
/// 3. Anything else: `MeanReversion`.
///
/// Low volatility is checked before trend strength; squeeze setups are rarer
/// and more time-sensitive than trend continuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeClassifier {
    squeeze_threshold: f64,
    adx_threshold: f64,
}

impl RegimeClassifier {
    pub fn new(settings: &StrategySettings) -> Self {
        Self {
            squeeze_threshold: settings.squeeze.atr_percent_threshold,
            adx_threshold: settings.trend.adx_threshold,
        }
    }

    pub fn classify(&self, snapshot: &IndicatorSnapshot, price: f64) -> Regime {
        if snapshot.atr_percent < self.squeeze_threshold {
            Regime::Squeeze
        } else if snapshot.adx > self.adx_threshold
            && snapshot.trend_sma.is_some_and(|sma| price > sma)
        {
            Regime::Turtle
        } else {
            Regime::MeanReversion
        }
    }
}
