// In crates/risk/src/fixed_fractional.rs

use crate::types::RiskSettings;
use crate::{Error, Result, RiskContext, RiskManager};
use core_types::{Action, OrderRequest, Signal, TradeDecision};
use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on a share quantity. Truncating (never rounding up)
/// keeps the exposure cap exact.
pub const SHARE_PRECISION: u32 = 8;

/// Sizes entries so that a stop `stop_atr_multiple` ATRs away loses
/// `risk_per_trade` of equity, capped at `max_position_fraction` of equity.
/// Exits always close the whole position.
#[derive(Debug, Clone)]
pub struct FixedFractionalRiskManager {
    risk_per_trade: Decimal,
    stop_atr_multiple: Decimal,
    max_position_fraction: Decimal,
}

fn fraction(name: &str, value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .filter(|d| *d > Decimal::ZERO)
        .ok_or_else(|| Error::InvalidParameters(format!("{name} must be a positive number, got {value}")))
}

impl FixedFractionalRiskManager {
    pub fn new(settings: &RiskSettings) -> Result<Self> {
        let max_position_fraction = fraction("max_position_fraction", settings.max_position_fraction)?;
        if max_position_fraction > Decimal::ONE {
            return Err(Error::InvalidParameters(format!(
                "max_position_fraction must not exceed 1, got {}",
                settings.max_position_fraction
            )));
        }
        Ok(Self {
            risk_per_trade: fraction("risk_per_trade", settings.risk_per_trade)?,
            stop_atr_multiple: fraction("stop_atr_multiple", settings.stop_atr_multiple)?,
            max_position_fraction,
        })
    }

    /// `min(equity * risk / (multiple * atr), equity * cap / price)`.
    /// Zero when the price or ATR is not positive, or the cap itself is not
    /// representable. An ATR so small that the risk budget overflows leaves
    /// the cap binding.
    pub fn position_size(&self, equity: Decimal, price: Decimal, atr: Decimal) -> Decimal {
        if price <= Decimal::ZERO || atr <= Decimal::ZERO || equity <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let Some(cap) = equity
            .checked_mul(self.max_position_fraction)
            .and_then(|budget| budget.checked_div(price))
        else {
            return Decimal::ZERO;
        };
        let raw = equity
            .checked_mul(self.risk_per_trade)
            .zip(self.stop_atr_multiple.checked_mul(atr))
            .and_then(|(risk_budget, stop_distance)| risk_budget.checked_div(stop_distance));

        raw.map_or(cap, |raw| raw.min(cap))
            .round_dp_with_strategy(SHARE_PRECISION, RoundingStrategy::ToZero)
    }
}

impl RiskManager for FixedFractionalRiskManager {
    fn name(&self) -> &'static str {
        "FixedFractionalRiskManager"
    }

    fn evaluate(&self, decision: &TradeDecision, ctx: &RiskContext<'_>) -> Result<Option<OrderRequest>> {
        let action = match decision.signal {
            Signal::Hold => return Ok(None),
            Signal::Buy => Action::Buy,
            Signal::Sell => Action::Sell,
        };

        let price = Decimal::from_f64(ctx.price)
            .filter(|p| *p > Decimal::ZERO)
            .ok_or_else(|| Error::DegenerateInput(format!("price {} is not usable", ctx.price)))?;

        let quantity = match action {
            Action::Buy => {
                if ctx.position.is_long() {
                    return Err(Error::Vetoed {
                        reason: "A position is already open for this symbol.".to_string(),
                    });
                }
                if ctx.available_cash <= Decimal::ZERO {
                    return Err(Error::Vetoed {
                        reason: "No cash available.".to_string(),
                    });
                }
                let atr = Decimal::from_f64(ctx.atr).unwrap_or_default();
                let shares = self.position_size(ctx.portfolio_equity, price, atr);
                if shares.is_zero() {
                    return Err(Error::DegenerateInput(format!(
                        "zero shares for price {} and ATR {}",
                        ctx.price, ctx.atr
                    )));
                }
                shares
            }
            Action::Sell => {
                if !ctx.position.is_long() {
                    return Err(Error::Vetoed {
                        reason: "No open position to close.".to_string(),
                    });
                }
                ctx.position.shares
            }
        };

        tracing::debug!(
            symbol = %ctx.symbol,
            %action,
            %quantity,
            %price,
            equity = %ctx.portfolio_equity,
            "Order sized."
        );

        Ok(Some(OrderRequest {
            symbol: ctx.symbol.clone(),
            action,
            quantity,
            price,
            strategy: ctx.regime,
            reason: decision.reason.to_string(),
            equity: ctx.portfolio_equity,
        }))
    }
}
