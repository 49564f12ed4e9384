// In crates/strategies/src/mean_reversion.rs

use crate::snapshot::IndicatorSnapshot;
use crate::types::MeanReversionSettings;
use crate::Strategy;
use core_types::{PositionStatus, Regime, TradeDecision};

pub const DIP_BUY: &str = "Dip Buy";
pub const MEAN_REVERT: &str = "Mean Revert";

/// Buys a close below the lower band and sells once price is back above the
/// centre line. The exit is on the mean, not on the upper band.
#[derive(Debug, Clone)]
pub struct MeanReversion {
    settings: MeanReversionSettings,
}

impl MeanReversion {
    pub fn new(settings: MeanReversionSettings) -> Self {
        Self { settings }
    }

    fn lower_band(&self, snapshot: &IndicatorSnapshot) -> Option<f64> {
        let mean = snapshot.reversion_sma?;
        let std = snapshot.reversion_std?;
        Some(mean - self.settings.std_dev * std)
    }
}

impl Strategy for MeanReversion {
    fn name(&self) -> &'static str {
        "MeanReversion"
    }

    fn regime(&self) -> Regime {
        Regime::MeanReversion
    }

    fn assess(&self, price: f64, status: PositionStatus, snapshot: &IndicatorSnapshot) -> TradeDecision {
        match status {
            PositionStatus::Neutral if self.lower_band(snapshot).is_some_and(|lower| price < lower) => {
                TradeDecision::buy(DIP_BUY)
            }
            PositionStatus::Long if snapshot.reversion_sma.is_some_and(|mean| price > mean) => {
                TradeDecision::sell(MEAN_REVERT)
            }
            _ => TradeDecision::hold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> MeanReversion {
        MeanReversion::new(MeanReversionSettings::default())
    }

    fn readings() -> IndicatorSnapshot {
        // Lower band = 100 - 2 * 5 = 90.
        IndicatorSnapshot {
            atr_percent: 3.0,
            reversion_sma: Some(100.0),
            reversion_std: Some(5.0),
            ..Default::default()
        }
    }

    #[test]
    fn buys_below_lower_band() {
        assert_eq!(
            strategy().assess(89.9, PositionStatus::Neutral, &readings()),
            TradeDecision::buy("Dip Buy")
        );
        assert!(strategy().assess(90.0, PositionStatus::Neutral, &readings()).is_hold());
    }

    #[test]
    fn sells_above_the_mean_not_the_upper_band() {
        assert_eq!(
            strategy().assess(100.5, PositionStatus::Long, &readings()),
            TradeDecision::sell("Mean Revert")
        );
        assert!(strategy().assess(100.0, PositionStatus::Long, &readings()).is_hold());
    }

    #[test]
    fn band_multiplier_is_configurable() {
        let wide = MeanReversion::new(MeanReversionSettings { window: 20, std_dev: 3.0 });
        // Lower band = 85.
        assert!(wide.assess(89.0, PositionStatus::Neutral, &readings()).is_hold());
        assert!(!wide.assess(84.0, PositionStatus::Neutral, &readings()).is_hold());
    }

    #[test]
    fn missing_statistics_hold() {
        let snapshot = IndicatorSnapshot::default();
        assert!(strategy().assess(1.0, PositionStatus::Neutral, &snapshot).is_hold());
        assert!(strategy().assess(1000.0, PositionStatus::Long, &snapshot).is_hold());
    }
}
