// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

/// Lookback lengths for the volatility and trend-strength indicators.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub atr_window: usize,
    pub adx_window: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            atr_window: 14,
            adx_window: 14,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SqueezeSettings {
    /// ATR as a percentage of price below which the market is "squeezed".
    pub atr_percent_threshold: f64,
    /// Bars of prior highs a squeeze breakout has to clear.
    pub breakout_window: usize,
}

impl Default for SqueezeSettings {
    fn default() -> Self {
        Self {
            atr_percent_threshold: 1.0,
            breakout_window: 20,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrendSettings {
    /// ADX strictly above this counts as a trending market.
    pub adx_threshold: f64,
    /// Long-term moving average the price must be above.
    pub sma_window: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            adx_threshold: 25.0,
            sma_window: 200,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MeanReversionSettings {
    pub window: usize,
    pub std_dev: f64,
}

impl Default for MeanReversionSettings {
    fn default() -> Self {
        Self {
            window: 20,
            std_dev: 2.0,
        }
    }
}

/// The container for every strategy-side setting.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StrategySettings {
    pub indicators: IndicatorSettings,
    pub squeeze: SqueezeSettings,
    pub trend: TrendSettings,
    pub mean_reversion: MeanReversionSettings,
}

/// Per-instrument channel lengths for the Turtle breakout. The exit channel
/// is normally shorter than the entry channel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TurtleWindows {
    pub entry_window: usize,
    pub exit_window: usize,
}
