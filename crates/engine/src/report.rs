// In crates/engine/src/report.rs

use chrono::{DateTime, Utc};
use core_types::{Action, Regime, Signal, Symbol};
use rust_decimal::Decimal;
use serde::Serialize;

/// What happened to one instrument during a cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// No usable data this cycle.
    Skipped { reason: String },
    /// The strategy had nothing to do.
    Held { regime: Regime, price: f64 },
    /// A transition was committed to the ledger.
    Traded {
        regime: Regime,
        action: Action,
        shares: Decimal,
        price: Decimal,
        reason: String,
    },
    /// A BUY/SELL signal was discarded by sizing or the ledger.
    Dropped {
        regime: Regime,
        signal: Signal,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentReport {
    pub symbol: Symbol,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Equity every entry this cycle was sized against.
    pub starting_equity: Decimal,
    pub ending_cash: Decimal,
    pub instruments: Vec<InstrumentReport>,
}

impl CycleReport {
    pub fn trades(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Traded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn dropped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Dropped { .. }))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.instruments.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn outcome(&self, symbol: &Symbol) -> Option<&Outcome> {
        self.instruments
            .iter()
            .find(|r| &r.symbol == symbol)
            .map(|r| &r.outcome)
    }

    /// One-line status for the trigger surface.
    pub fn summary(&self) -> String {
        format!(
            "Logic Executed Successfully: {} instruments, {} trades, {} skipped, {} dropped",
            self.instruments.len(),
            self.trades(),
            self.skipped(),
            self.dropped()
        )
    }
}
