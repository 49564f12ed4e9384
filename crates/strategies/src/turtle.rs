// In crates/strategies/src/turtle.rs

use crate::snapshot::IndicatorSnapshot;
use crate::Strategy;
use core_types::{PositionStatus, Regime, TradeDecision};

pub const ENTRY: &str = "Turtle Entry";
pub const EXIT: &str = "Turtle Exit";

/// Channel breakout trend following.
///
/// Enters on a close above the entry-channel high and exits on a close below
/// the exit-channel low. Both channels are per-instrument and already baked
/// into the snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct TurtleBreakout;

impl Strategy for TurtleBreakout {
    fn name(&self) -> &'static str {
        "TurtleBreakout"
    }

    fn regime(&self) -> Regime {
        Regime::Turtle
    }

    fn assess(&self, price: f64, status: PositionStatus, snapshot: &IndicatorSnapshot) -> TradeDecision {
        match status {
            PositionStatus::Neutral if snapshot.entry_high.is_some_and(|high| price > high) => {
                TradeDecision::buy(ENTRY)
            }
            PositionStatus::Long if snapshot.exit_low.is_some_and(|low| price < low) => {
                TradeDecision::sell(EXIT)
            }
            _ => TradeDecision::hold(),
        }
    }
}
