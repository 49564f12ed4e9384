// In crates/events/src/lib.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Action, LogEntry, Regime, Symbol};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::time::Duration;

/// An executed trade, as announced to the outside world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeEvent {
    pub timestamp: DateTime<Utc>,
    pub symbol: Symbol,
    pub strategy: Regime,
    pub action: Action,
    pub shares: Decimal,
    pub price: Decimal,
    /// Pre-trade portfolio equity.
    pub equity: Decimal,
    pub reason: String,
}

impl From<&LogEntry> for TradeEvent {
    fn from(entry: &LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            symbol: entry.symbol.clone(),
            strategy: entry.strategy,
            action: entry.action,
            shares: entry.shares,
            price: entry.price,
            equity: entry.equity_at_trade,
            reason: entry.reason.clone(),
        }
    }
}

impl TradeEvent {
    /// `[TURTLE] BUY WDC: 240.00 @ $100.00 | Eq: $100,000`
    pub fn message(&self) -> String {
        format!(
            "[{}] {} {}: {:.2} @ ${:.2} | Eq: ${}",
            self.strategy,
            self.action,
            self.symbol,
            self.shares.round_dp(2),
            self.price.round_dp(2),
            group_thousands(self.equity)
        )
    }
}

/// Whole-unit amount with comma thousands separators.
pub fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// A fire-and-forget sink for human-readable trade messages.
///
/// Implementations must swallow their own failures and return promptly; a
/// notification never fails or stalls a cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, text: &str);

    /// Waits up to `timeout` for deliveries still in flight. Sinks that
    /// deliver inline have nothing to wait for.
    async fn flush(&self, _timeout: Duration) {}
}

/// Writes every notification to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "LogNotifier"
    }

    async fn notify(&self, text: &str) {
        tracing::info!(target: "notifications", "{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn event() -> TradeEvent {
        TradeEvent {
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            symbol: Symbol::from("WDC"),
            strategy: Regime::Turtle,
            action: Action::Buy,
            shares: dec!(240),
            price: dec!(100.256),
            equity: dec!(1234567.5),
            reason: "Turtle Entry".to_string(),
        }
    }

    #[test]
    fn message_matches_the_announcement_format() {
        assert_eq!(
            event().message(),
            "[TURTLE] BUY WDC: 240.00 @ $100.26 | Eq: $1,234,568"
        );
    }

    #[test]
    fn prices_and_shares_round_rather_than_truncate() {
        let mut trade = event();
        trade.shares = dec!(65.04878048);
        trade.price = dec!(368.999);
        assert_eq!(trade.message(), "[TURTLE] BUY WDC: 65.05 @ $369.00 | Eq: $1,234,568");

        trade.price = dec!(100.125);
        assert!(trade.message().contains("@ $100.12 |"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(dec!(0)), "0");
        assert_eq!(group_thousands(dec!(999.4)), "999");
        assert_eq!(group_thousands(dec!(1000)), "1,000");
        assert_eq!(group_thousands(dec!(100000)), "100,000");
        assert_eq!(group_thousands(dec!(-2500.5)), "-2,500");
    }

    #[test]
    fn event_serializes_with_labels() {
        let json = serde_json::to_value(event()).unwrap();
        assert_eq!(json["strategy"], "TURTLE");
        assert_eq!(json["action"], "BUY");
        assert_eq!(json["symbol"], "WDC");
        assert_eq!(json["shares"], "240");
    }

    #[tokio::test]
    async fn log_notifier_never_fails() {
        LogNotifier.notify(&event().message()).await;
        LogNotifier.flush(Duration::from_millis(1)).await;
    }
}
