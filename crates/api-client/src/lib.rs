// In crates/api-client/src/lib.rs

use async_trait::async_trait;
use core_types::{PriceBar, Symbol};
use std::collections::HashMap;

pub mod error;
pub mod types;
pub mod webhook;
pub mod yahoo;

// Re-export public types
pub use error::{Error, Result};
pub use webhook::WebhookNotifier;
pub use yahoo::YahooClient;

/// A source of daily price history.
///
/// Any error, including an empty series, means the instrument has no data
/// this cycle. Callers skip it and do not retry.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Ascending daily bars covering roughly the last `lookback_days` calendar days.
    async fn fetch(&self, symbol: &Symbol, lookback_days: u32) -> Result<Vec<PriceBar>>;
}

/// Serves fixed series from memory. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    series: HashMap<Symbol, Vec<PriceBar>>,
}

impl StaticFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: impl Into<Symbol>, bars: Vec<PriceBar>) -> Self {
        self.series.insert(symbol.into(), bars);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticFeed {
    fn name(&self) -> &'static str {
        "StaticFeed"
    }

    async fn fetch(&self, symbol: &Symbol, _lookback_days: u32) -> Result<Vec<PriceBar>> {
        match self.series.get(symbol) {
            Some(bars) if !bars.is_empty() => Ok(bars.clone()),
            _ => Err(Error::NoData(symbol.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn static_feed_serves_known_symbols_only() {
        let bar = PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
        };
        let feed = StaticFeed::new()
            .with_series("WDC", vec![bar])
            .with_series("STX", Vec::new());

        assert_eq!(feed.fetch(&Symbol::from("WDC"), 300).await.unwrap(), vec![bar]);
        assert!(matches!(feed.fetch(&Symbol::from("STX"), 300).await, Err(Error::NoData(_))));
        assert!(matches!(feed.fetch(&Symbol::from("CAH"), 300).await, Err(Error::NoData(_))));
    }
}
