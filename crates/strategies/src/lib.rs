// In crates/strategies/src/lib.rs

use core_types::{PositionStatus, PriceBar, Regime, TradeDecision};

pub mod error;
pub mod factory;
pub mod indicators;
pub mod mean_reversion;
pub mod regime;
pub mod snapshot;
pub mod squeeze;
pub mod turtle;
pub mod types;

pub use error::{Error, Result};
pub use regime::RegimeClassifier;
pub use snapshot::IndicatorSnapshot;
pub use types::{StrategySettings, TurtleWindows};

/// The interface every regime strategy implements.
///
/// A strategy is stateless: everything it needs about the market is in the
/// snapshot and everything it needs about the book is the position status.
/// It answers with a signal and a short human-readable reason.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The regime this strategy is selected for.
    fn regime(&self) -> Regime;

    fn assess(&self, price: f64, status: PositionStatus, snapshot: &IndicatorSnapshot) -> TradeDecision;
}

/// The outcome of evaluating one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub price: f64,
    pub snapshot: IndicatorSnapshot,
    pub regime: Regime,
    pub decision: TradeDecision,
}

/// Computes indicators, classifies the regime and dispatches to the
/// strategy registered for it.
pub struct SignalEngine {
    settings: StrategySettings,
    classifier: RegimeClassifier,
    strategies: Vec<Box<dyn Strategy + Send + Sync>>,
}

impl SignalEngine {
    pub fn new(settings: StrategySettings) -> Self {
        Self {
            classifier: RegimeClassifier::new(&settings),
            strategies: factory::create_strategies(&settings),
            settings,
        }
    }

    pub fn evaluate(
        &self,
        bars: &[PriceBar],
        status: PositionStatus,
        windows: TurtleWindows,
    ) -> Result<Evaluation> {
        let snapshot = IndicatorSnapshot::compute(bars, &self.settings, windows)?;
        let price = snapshot::latest_close(bars)?;
        let regime = self.classifier.classify(&snapshot, price);

        let decision = self
            .strategies
            .iter()
            .find(|strategy| strategy.regime() == regime)
            .map(|strategy| strategy.assess(price, status, &snapshot))
            .unwrap_or_else(TradeDecision::hold);

        Ok(Evaluation {
            price,
            snapshot,
            regime,
            decision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::tests::{bar, uptrend};
    use core_types::Signal;

    const WINDOWS: TurtleWindows = TurtleWindows {
        entry_window: 50,
        exit_window: 20,
    };

    fn engine() -> SignalEngine {
        SignalEngine::new(StrategySettings::default())
    }

    #[test]
    fn quiet_market_breaking_its_range_is_a_squeeze_buy() {
        // Flat closes at 100 with a tight 0.4 range keep ATR% near 0.4%.
        let mut bars: Vec<PriceBar> = (0..40).map(|d| bar(d, 100.2, 99.8, 100.0)).collect();
        bars.push(bar(40, 100.3, 99.9, 100.25));

        let eval = engine().evaluate(&bars, PositionStatus::Neutral, WINDOWS).unwrap();
        assert_eq!(eval.regime, Regime::Squeeze);
        assert_eq!(eval.decision, TradeDecision::buy("Squeeze Breakout"));
        assert_eq!(eval.price, 100.25);
    }

    #[test]
    fn strong_uptrend_breaking_out_is_a_turtle_entry() {
        // 260 bars rising by 1 with a 6-point range: ATR% well above 1, ADX near 100.
        let mut bars = uptrend(260, 100.0, 1.0, 3.0);
        let last = bars.last().unwrap().close;
        bars.push(bar(260, last + 13.0, last + 7.0, last + 10.0));

        let eval = engine().evaluate(&bars, PositionStatus::Neutral, WINDOWS).unwrap();
        assert_eq!(eval.regime, Regime::Turtle);
        assert_eq!(eval.decision.signal, Signal::Buy);
        assert_eq!(eval.decision.reason, "Turtle Entry");
    }

    #[test]
    fn long_position_in_a_trend_holds_inside_the_channel() {
        let bars = uptrend(260, 100.0, 1.0, 3.0);
        let eval = engine().evaluate(&bars, PositionStatus::Long, WINDOWS).unwrap();
        assert_eq!(eval.regime, Regime::Turtle);
        assert!(eval.decision.is_hold());
    }

    #[test]
    fn without_a_long_term_average_trend_cannot_be_selected() {
        // Trending but only 100 bars, so the 200-bar SMA is undefined.
        let bars = uptrend(100, 100.0, 1.0, 3.0);
        let eval = engine().evaluate(&bars, PositionStatus::Neutral, WINDOWS).unwrap();
        assert_eq!(eval.regime, Regime::MeanReversion);
    }

    #[test]
    fn short_history_propagates_as_error() {
        let bars = uptrend(5, 100.0, 1.0, 1.0);
        assert!(matches!(
            engine().evaluate(&bars, PositionStatus::Neutral, WINDOWS),
            Err(Error::InsufficientHistory { .. })
        ));
    }
}
