// In crates/strategies/src/squeeze.rs

use crate::snapshot::IndicatorSnapshot;
use crate::Strategy;
use core_types::{PositionStatus, Regime, TradeDecision};

pub const BREAKOUT: &str = "Squeeze Breakout";

/// Buys a close above the prior highs while volatility is compressed.
///
/// There is no exit rule: a position opened here stays open until a later
/// cycle classifies the instrument into a regime whose strategy can sell it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqueezeBreakout;

impl Strategy for SqueezeBreakout {
    fn name(&self) -> &'static str {
        "SqueezeBreakout"
    }

    fn regime(&self) -> Regime {
        Regime::Squeeze
    }

    fn assess(&self, price: f64, status: PositionStatus, snapshot: &IndicatorSnapshot) -> TradeDecision {
        match (status, snapshot.squeeze_high) {
            (PositionStatus::Neutral, Some(high)) if price > high => TradeDecision::buy(BREAKOUT),
            _ => TradeDecision::hold(),
        }
    }
}
