// In crates/core-types/src/lib.rs

pub mod ledger;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use ledger::{LedgerState, LogEntry, MAX_LOG_ENTRIES};
pub use types::{
    Action, OrderRequest, Position, PositionStatus, PriceBar, Regime, Signal, Symbol,
    TradeDecision,
};
