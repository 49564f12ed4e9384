// In crates/risk/src/lib.rs

use core_types::{OrderRequest, Position, Regime, Symbol, TradeDecision};
use rust_decimal::Decimal;

pub mod error;
pub mod fixed_fractional;
pub mod types;

pub use error::{Error, Result};
pub use fixed_fractional::FixedFractionalRiskManager;
pub use types::RiskSettings;

/// Everything the risk manager needs to know about one instrument at the
/// moment a decision is made.
#[derive(Debug, Clone)]
pub struct RiskContext<'a> {
    pub symbol: &'a Symbol,
    pub regime: Regime,
    pub price: f64,
    /// ATR in price units, not percent.
    pub atr: f64,
    /// Pre-trade equity for the whole cycle.
    pub portfolio_equity: Decimal,
    pub available_cash: Decimal,
    pub position: Position,
}

/// The universal interface for a risk management module.
///
/// A `RiskManager` turns a strategy decision into a sized `OrderRequest`.
pub trait RiskManager: Sync {
    /// The name of the risk management strategy.
    fn name(&self) -> &'static str;

    /// Evaluates a decision against the current portfolio.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(OrderRequest))`: the decision is approved and sized.
    /// * `Ok(None)`: nothing to do (a `Hold`).
    /// * `Err(Error::Vetoed)` / `Err(Error::DegenerateInput)`: the decision
    ///   must be dropped for this cycle.
    fn evaluate(&self, decision: &TradeDecision, ctx: &RiskContext<'_>) -> Result<Option<OrderRequest>>;
}
