// In crates/strategies/src/factory.rs

use crate::mean_reversion::MeanReversion;
use crate::squeeze::SqueezeBreakout;
use crate::turtle::TurtleBreakout;
use crate::types::StrategySettings;
use crate::Strategy;
use core_types::Regime;

/// Builds the strategy that trades instruments classified into `regime`.
pub fn create_strategy(regime: Regime, settings: &StrategySettings) -> Box<dyn Strategy + Send + Sync> {
    match regime {
        Regime::Squeeze => Box::new(SqueezeBreakout),
        Regime::Turtle => Box::new(TurtleBreakout),
        Regime::MeanReversion => Box::new(MeanReversion::new(settings.mean_reversion.clone())),
    }
}

/// One strategy per regime, in classification priority order.
pub fn create_strategies(settings: &StrategySettings) -> Vec<Box<dyn Strategy + Send + Sync>> {
    [Regime::Squeeze, Regime::Turtle, Regime::MeanReversion]
        .into_iter()
        .map(|regime| create_strategy(regime, settings))
        .collect()
}
