// In crates/engine/src/lib.rs

pub mod bootstrap;
pub mod error;
pub mod report;

use api_client::MarketDataProvider;
use app_config::{InstrumentConfig, Settings};
use chrono::Utc;
use core_types::{LedgerState, PriceBar, Signal, Symbol};
use database::StateStore;
use events::{Notifier, TradeEvent};
use execution::{Executor, SimulatedExecutor, SimulationSettings};
use num_traits::FromPrimitive;
use risk::{FixedFractionalRiskManager, RiskContext, RiskManager};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use strategies::{Evaluation, SignalEngine};

pub use bootstrap::build_engine;
pub use error::{CycleError, Error, Result};
pub use report::{CycleReport, InstrumentReport, Outcome};

/// Runs evaluation cycles over the configured instruments against one
/// persisted ledger.
///
/// The engine itself holds no ledger between cycles: each cycle loads it,
/// threads it through every instrument and saves it once at the end.
/// Overlapping cycles must be prevented by the caller.
pub struct Engine {
    settings: Settings,
    initial_capital: Decimal,
    signals: SignalEngine,
    risk_manager: Box<dyn RiskManager + Send + Sync>,
    executor: Box<dyn Executor + Send + Sync>,
    provider: Arc<dyn MarketDataProvider>,
    store: Arc<dyn StateStore>,
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl Engine {
    pub fn new(
        settings: Settings,
        provider: Arc<dyn MarketDataProvider>,
        store: Arc<dyn StateStore>,
    ) -> Result<Self> {
        let initial_capital = Decimal::from_f64(settings.portfolio.initial_capital)
            .filter(|cash| *cash > Decimal::ZERO)
            .ok_or_else(|| {
                Error::Portfolio(format!(
                    "initial_capital must be positive, got {}",
                    settings.portfolio.initial_capital
                ))
            })?;
        let risk_manager = FixedFractionalRiskManager::new(&settings.risk)?;
        let executor = SimulatedExecutor::new(&SimulationSettings {
            commission_rate: settings.portfolio.commission_rate,
        })?;

        Ok(Self {
            signals: SignalEngine::new(settings.strategies.clone()),
            initial_capital,
            risk_manager: Box::new(risk_manager),
            executor: Box::new(executor),
            provider,
            store,
            notifiers: Vec::new(),
            settings,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    /// Gives every notifier up to `timeout` to finish deliveries still in
    /// flight. Call before a one-shot process exits.
    pub async fn flush_notifications(&self, timeout: Duration) {
        for notifier in &self.notifiers {
            notifier.flush(timeout).await;
        }
    }

    fn instruments(&self) -> Vec<&InstrumentConfig> {
        self.settings.active_instruments().collect()
    }

    /// The ledger a brand-new store starts from.
    pub fn initial_ledger(&self) -> LedgerState {
        LedgerState::new(
            self.initial_capital,
            self.instruments().into_iter().map(InstrumentConfig::symbol),
        )
    }

    /// The persisted ledger, or the initial one if nothing has been saved.
    /// Never writes.
    pub async fn snapshot(&self) -> std::result::Result<LedgerState, CycleError> {
        let mut ledger = self.store.fetch().await?.unwrap_or_else(|| self.initial_ledger());
        ledger.track(self.instruments().into_iter().map(InstrumentConfig::symbol));
        Ok(ledger)
    }

    /// Runs one full cycle: load, fetch, evaluate and trade every instrument
    /// in configuration order, then save.
    pub async fn run_cycle(&self) -> std::result::Result<CycleReport, CycleError> {
        let started_at = Utc::now();
        let instruments = self.instruments();
        tracing::info!(instruments = instruments.len(), "Starting evaluation cycle.");

        let mut ledger = self.store.load_or_init(&self.initial_ledger()).await?;
        ledger.track(instruments.iter().map(|i| i.symbol()));

        let mut market = Vec::with_capacity(instruments.len());
        for instrument in &instruments {
            let symbol = instrument.symbol();
            let bars = self
                .provider
                .fetch(&symbol, self.settings.market_data.history_lookback_days)
                .await;
            if let Err(e) = &bars {
                tracing::warn!(%symbol, error = %e, "No market data, skipping instrument this cycle.");
            }
            market.push((*instrument, symbol, bars));
        }

        let prices: HashMap<Symbol, Decimal> = market
            .iter()
            .filter_map(|(_, symbol, bars)| {
                let close = bars.as_ref().ok()?.last()?.close;
                Some((symbol.clone(), Decimal::from_f64(close)?))
            })
            .collect();
        let starting_equity = ledger.mark_to_market(&prices);
        tracing::info!(equity = %starting_equity, cash = %ledger.cash, "Pre-trade equity.");

        let mut reports = Vec::with_capacity(market.len());
        for (instrument, symbol, bars) in market {
            let outcome = match bars {
                Ok(bars) => {
                    self.process_instrument(instrument, &symbol, &bars, starting_equity, &mut ledger)
                        .await
                }
                Err(e) => Outcome::Skipped { reason: e.to_string() },
            };
            reports.push(InstrumentReport { symbol, outcome });
        }

        debug_assert!(ledger.positions_consistent());
        self.store.save(&mut ledger).await?;

        let report = CycleReport {
            started_at,
            finished_at: Utc::now(),
            starting_equity,
            ending_cash: ledger.cash,
            instruments: reports,
        };
        tracing::info!(
            trades = report.trades(),
            skipped = report.skipped(),
            dropped = report.dropped(),
            cash = %report.ending_cash,
            "Cycle complete."
        );
        Ok(report)
    }

    async fn process_instrument(
        &self,
        instrument: &InstrumentConfig,
        symbol: &Symbol,
        bars: &[PriceBar],
        equity: Decimal,
        ledger: &mut LedgerState,
    ) -> Outcome {
        let position = ledger.position(symbol);
        let Evaluation {
            price,
            snapshot,
            regime,
            decision,
        } = match self.signals.evaluate(bars, position.status, instrument.windows()) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "Indicators unavailable, skipping instrument.");
                return Outcome::Skipped { reason: e.to_string() };
            }
        };

        tracing::debug!(
            %symbol,
            %regime,
            price,
            atr_percent = snapshot.atr_percent,
            adx = snapshot.adx,
            signal = ?decision.signal,
            "Instrument evaluated."
        );

        if decision.signal == Signal::Hold {
            return Outcome::Held { regime, price };
        }

        let ctx = RiskContext {
            symbol,
            regime,
            price,
            atr: snapshot.atr_value,
            portfolio_equity: equity,
            available_cash: ledger.cash,
            position,
        };
        let order = match self.risk_manager.evaluate(&decision, &ctx) {
            Ok(Some(order)) => order,
            Ok(None) => return Outcome::Held { regime, price },
            Err(e) => {
                tracing::info!(%symbol, signal = ?decision.signal, reason = %e, "Signal dropped by risk manager.");
                return Outcome::Dropped {
                    regime,
                    signal: decision.signal,
                    reason: e.to_string(),
                };
            }
        };

        match self.executor.execute(&order, Utc::now(), ledger) {
            Ok(fill) => {
                let message = TradeEvent::from(&fill.log).message();
                for notifier in &self.notifiers {
                    notifier.notify(&message).await;
                }
                Outcome::Traded {
                    regime,
                    action: fill.action,
                    shares: fill.quantity,
                    price: fill.price,
                    reason: order.reason,
                }
            }
            Err(e) => {
                tracing::info!(%symbol, signal = ?decision.signal, reason = %e, "Order not filled.");
                Outcome::Dropped {
                    regime,
                    signal: decision.signal,
                    reason: e.to_string(),
                }
            }
        }
    }
}
