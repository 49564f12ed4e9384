// In crates/execution/src/simulated.rs

use crate::types::{Execution, SimulationSettings};
use crate::{Error, Executor, Result};
use chrono::{DateTime, Utc};
use core_types::{Action, LedgerState, LogEntry, OrderRequest, Position};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fills every order in full at the order price, charging a flat commission
/// on the notional.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    commission_rate: Decimal,
}

impl SimulatedExecutor {
    pub fn new(settings: &SimulationSettings) -> Result<Self> {
        let commission_rate = Decimal::from_f64(settings.commission_rate)
            .filter(|rate| *rate >= Decimal::ZERO && *rate < Decimal::ONE)
            .ok_or_else(|| {
                Error::InvalidSettings(format!(
                    "commission_rate must be in [0, 1), got {}",
                    settings.commission_rate
                ))
            })?;
        Ok(Self { commission_rate })
    }

    /// NEUTRAL -> LONG. Commits only if the all-in cost is strictly below cash.
    fn process_entry(&self, order: &OrderRequest, ledger: &mut LedgerState) -> Result<(Decimal, Decimal)> {
        if ledger.position(&order.symbol).is_long() {
            return Err(Error::PositionAlreadyOpen(order.symbol.clone()));
        }

        let notional = order.quantity * order.price;
        let commission = notional * self.commission_rate;
        let cost = notional * (dec!(1) + self.commission_rate);
        if cost >= ledger.cash {
            return Err(Error::InsufficientFunds {
                required: cost,
                available: ledger.cash,
            });
        }

        ledger.cash -= cost;
        ledger.set_position(order.symbol.clone(), Position::long(order.quantity, order.price));
        Ok((order.quantity, commission))
    }

    /// LONG -> NEUTRAL. Always sells the whole position.
    fn process_close(&self, order: &OrderRequest, ledger: &mut LedgerState) -> Result<(Decimal, Decimal)> {
        let position = ledger.position(&order.symbol);
        if !position.is_long() {
            return Err(Error::NoPosition(order.symbol.clone()));
        }

        let notional = position.shares * order.price;
        let commission = notional * self.commission_rate;
        ledger.cash += notional - commission;
        ledger.set_position(order.symbol.clone(), Position::neutral());
        Ok((position.shares, commission))
    }
}

impl Executor for SimulatedExecutor {
    fn name(&self) -> &'static str {
        "SimulatedExecutor"
    }

    fn execute(
        &self,
        order: &OrderRequest,
        timestamp: DateTime<Utc>,
        ledger: &mut LedgerState,
    ) -> Result<Execution> {
        if order.price <= Decimal::ZERO {
            return Err(Error::InvalidOrder(format!("price must be positive, got {}", order.price)));
        }
        if order.action == Action::Buy && order.quantity <= Decimal::ZERO {
            return Err(Error::InvalidOrder(format!(
                "quantity must be positive, got {}",
                order.quantity
            )));
        }

        let cash_before = ledger.cash;
        let (quantity, commission) = match order.action {
            Action::Buy => self.process_entry(order, ledger)?,
            Action::Sell => self.process_close(order, ledger)?,
        };

        let log = LogEntry {
            timestamp,
            symbol: order.symbol.clone(),
            strategy: order.strategy,
            action: order.action,
            price: order.price,
            shares: quantity,
            equity_at_trade: order.equity,
            reason: order.reason.clone(),
        };
        ledger.logs.push(log.clone());

        tracing::info!(
            symbol = %order.symbol,
            action = %order.action,
            %quantity,
            price = %order.price,
            cash = %ledger.cash,
            "Order filled."
        );

        Ok(Execution {
            symbol: order.symbol.clone(),
            action: order.action,
            price: order.price,
            quantity,
            commission,
            cash_delta: ledger.cash - cash_before,
            log,
        })
    }
}
