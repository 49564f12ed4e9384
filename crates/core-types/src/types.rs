// In crates/core-types/src/types.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ticker symbol, e.g. "WDC".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// One daily OHLC bar. Series are ascending by date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// The output of a strategy for one instrument in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// A signal together with the human-readable rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeDecision {
    pub signal: Signal,
    pub reason: &'static str,
}

impl TradeDecision {
    pub const fn hold() -> Self {
        Self { signal: Signal::Hold, reason: "" }
    }

    pub const fn buy(reason: &'static str) -> Self {
        Self { signal: Signal::Buy, reason }
    }

    pub const fn sell(reason: &'static str) -> Self {
        Self { signal: Signal::Sell, reason }
    }

    pub fn is_hold(&self) -> bool {
        self.signal == Signal::Hold
    }
}

/// The market regime an instrument is classified into. Each regime maps to
/// exactly one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    /// Volatility compression; traded with a fast breakout.
    Squeeze,
    /// Established uptrend; traded with a channel breakout.
    Turtle,
    /// Fallback regime; traded by buying statistical dips.
    MeanReversion,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Squeeze => "SQUEEZE",
            Regime::Turtle => "TURTLE",
            Regime::MeanReversion => "MEAN_REVERSION",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => f.write_str("BUY"),
            Action::Sell => f.write_str("SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionStatus {
    #[default]
    Neutral,
    Long,
}

/// The holding in one instrument.
///
/// Invariant: `status == Neutral` exactly when `shares` and `entry_price` are
/// both zero. Use the constructors rather than building the struct by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub status: PositionStatus,
    pub shares: Decimal,
    pub entry_price: Decimal,
}

impl Position {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn long(shares: Decimal, entry_price: Decimal) -> Self {
        Self {
            status: PositionStatus::Long,
            shares,
            entry_price,
        }
    }

    pub fn is_long(&self) -> bool {
        self.status == PositionStatus::Long
    }

    /// Checks the status/shares/entry-price invariant.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            PositionStatus::Neutral => self.shares.is_zero() && self.entry_price.is_zero(),
            PositionStatus::Long => {
                self.shares > Decimal::ZERO && self.entry_price > Decimal::ZERO
            }
        }
    }
}

/// A sized, risk-approved instruction to mutate the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub action: Action,
    pub quantity: Decimal,
    pub price: Decimal,
    /// The regime whose strategy produced the originating signal.
    pub strategy: Regime,
    pub reason: String,
    /// Portfolio equity the order was sized against.
    pub equity: Decimal,
}
