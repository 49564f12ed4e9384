// In crates/risk/src/types.rs

use serde::{Deserialize, Serialize};

/// Fixed-fractional sizing parameters, as fractions of portfolio equity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RiskSettings {
    /// Equity put at risk on a single trade.
    pub risk_per_trade: f64,
    /// Stop distance in multiples of ATR.
    pub stop_atr_multiple: f64,
    /// Largest share of equity a single new position may take.
    pub max_position_fraction: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            risk_per_trade: 0.02,
            stop_atr_multiple: 2.0,
            max_position_fraction: 0.24,
        }
    }
}
