// In crates/core-types/src/ledger.rs

use crate::types::{Action, Position, Regime, Symbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The number of audit-log entries kept when the ledger is persisted.
pub const MAX_LOG_ENTRIES: usize = 50;

/// An immutable record of one executed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub symbol: Symbol,
    pub strategy: Regime,
    pub action: Action,
    pub price: Decimal,
    pub shares: Decimal,
    pub equity_at_trade: Decimal,
    pub reason: String,
}

/// The single persisted record of cash, positions and trade history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub cash: Decimal,
    pub positions: BTreeMap<Symbol, Position>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl LedgerState {
    /// A fresh ledger: all of `initial_cash` available, every symbol NEUTRAL.
    pub fn new(initial_cash: Decimal, symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            cash: initial_cash,
            positions: symbols
                .into_iter()
                .map(|symbol| (symbol, Position::neutral()))
                .collect(),
            logs: Vec::new(),
        }
    }

    /// The position for `symbol`. Symbols the ledger has never seen are NEUTRAL.
    pub fn position(&self, symbol: &Symbol) -> Position {
        self.positions.get(symbol).copied().unwrap_or_default()
    }

    pub fn set_position(&mut self, symbol: Symbol, position: Position) {
        self.positions.insert(symbol, position);
    }

    /// Inserts a NEUTRAL position for every symbol not already tracked.
    pub fn track(&mut self, symbols: impl IntoIterator<Item = Symbol>) {
        for symbol in symbols {
            self.positions.entry(symbol).or_default();
        }
    }

    /// Cash plus every held position valued at `prices`, falling back to the
    /// entry price for symbols without a quote.
    pub fn mark_to_market(&self, prices: &HashMap<Symbol, Decimal>) -> Decimal {
        self.positions
            .iter()
            .filter(|(_, position)| position.shares > Decimal::ZERO)
            .fold(self.cash, |equity, (symbol, position)| {
                let price = prices.get(symbol).copied().unwrap_or(position.entry_price);
                equity + position.shares * price
            })
    }

    /// Drops the oldest log entries so that at most `max` remain.
    pub fn truncate_logs(&mut self, max: usize) {
        if self.logs.len() > max {
            let excess = self.logs.len() - max;
            self.logs.drain(..excess);
        }
    }

    pub fn positions_consistent(&self) -> bool {
        self.positions.values().all(Position::is_consistent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(n: i64) -> LogEntry {
        LogEntry {
            timestamp: DateTime::from_timestamp(1_700_000_000 + n, 0).unwrap(),
            symbol: Symbol::from("WDC"),
            strategy: Regime::Turtle,
            action: Action::Buy,
            price: Decimal::from(n),
            shares: dec!(1),
            equity_at_trade: dec!(100000),
            reason: format!("entry {n}"),
        }
    }

    #[test]
    fn new_ledger_is_all_neutral() {
        let ledger = LedgerState::new(dec!(100000), ["WDC", "STX"].map(Symbol::from));
        assert_eq!(ledger.cash, dec!(100000));
        assert_eq!(ledger.positions.len(), 2);
        assert!(ledger.positions_consistent());
        assert!(ledger.logs.is_empty());
    }

    #[test]
    fn unknown_symbol_is_neutral() {
        let ledger = LedgerState::new(dec!(1), []);
        assert_eq!(ledger.position(&Symbol::from("HOOD")), Position::neutral());
    }

    #[test]
    fn mark_to_market_falls_back_to_entry_price() {
        let mut ledger = LedgerState::new(dec!(1000), ["WDC", "STX", "CAH"].map(Symbol::from));
        ledger.set_position(Symbol::from("WDC"), Position::long(dec!(10), dec!(50)));
        ledger.set_position(Symbol::from("STX"), Position::long(dec!(2), dec!(100)));

        let prices = HashMap::from([(Symbol::from("WDC"), dec!(60)), (Symbol::from("CAH"), dec!(999))]);

        // 1000 cash + 10 * 60 (quoted) + 2 * 100 (entry fallback); CAH is flat.
        assert_eq!(ledger.mark_to_market(&prices), dec!(1800));
    }

    #[test]
    fn truncation_keeps_most_recent() {
        let mut ledger = LedgerState::new(dec!(1), []);
        ledger.logs = (0..60).map(entry).collect();

        ledger.truncate_logs(MAX_LOG_ENTRIES);

        assert_eq!(ledger.logs.len(), 50);
        assert_eq!(ledger.logs.first().unwrap().reason, "entry 10");
        assert_eq!(ledger.logs.last().unwrap().reason, "entry 59");
    }

    #[test]
    fn json_round_trip() {
        let mut ledger = LedgerState::new(dec!(98765.4321), ["WDC"].map(Symbol::from));
        ledger.set_position(Symbol::from("WDC"), Position::long(dec!(12.5), dec!(88.1)));
        ledger.logs.push(entry(1));

        let json = serde_json::to_string(&ledger).unwrap();
        let back: LedgerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
