// In crates/execution/src/types.rs

use core_types::{Action, LogEntry, Symbol};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Charged on both sides of a trade (e.g., 0.001 for 0.1%).
    pub commission_rate: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            commission_rate: 0.001,
        }
    }
}

/// A committed fill and the audit record it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub symbol: Symbol,
    pub action: Action,
    pub price: Decimal,
    pub quantity: Decimal,
    pub commission: Decimal,
    /// Cash paid (BUY, negative) or received (SELL, positive).
    pub cash_delta: Decimal,
    pub log: LogEntry,
}
