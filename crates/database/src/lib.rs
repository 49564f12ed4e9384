// In crates/database/src/lib.rs

use async_trait::async_trait;
use core_types::{LedgerState, MAX_LOG_ENTRIES};

pub mod error;
pub mod file;
pub mod memory;
pub mod postgres;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use file::FileStore;
pub use memory::{MemoryStore, UnavailableStore};
pub use postgres::{connect, Db};

/// Durable home of the single portfolio ledger.
///
/// Implementors provide raw `fetch`/`store`; callers use `load_or_init` and
/// `save`, which add first-run initialisation and log truncation.
#[async_trait]
pub trait StateStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// The stored ledger, or `None` if nothing has been saved yet.
    async fn fetch(&self) -> Result<Option<LedgerState>>;

    /// Overwrites the stored ledger.
    async fn store(&self, state: &LedgerState) -> Result<()>;

    /// Loads the ledger, persisting and returning `initial` on first use.
    async fn load_or_init(&self, initial: &LedgerState) -> Result<LedgerState> {
        match self.fetch().await? {
            Some(state) => Ok(state),
            None => {
                tracing::info!(store = self.name(), "No ledger found, creating the initial one.");
                self.store(initial).await?;
                Ok(initial.clone())
            }
        }
    }

    /// Truncates the audit log to the most recent entries, then overwrites.
    async fn save(&self, state: &mut LedgerState) -> Result<()> {
        state.truncate_logs(MAX_LOG_ENTRIES);
        self.store(state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use core_types::{Action, LogEntry, Position, Regime, Symbol};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn entry(n: i64) -> LogEntry {
        LogEntry {
            timestamp: DateTime::from_timestamp(1_700_000_000 + n, 0).unwrap(),
            symbol: Symbol::from("HOOD"),
            strategy: Regime::MeanReversion,
            action: Action::Buy,
            price: Decimal::from(n),
            shares: dec!(1.5),
            equity_at_trade: dec!(100000),
            reason: "Dip Buy".to_string(),
        }
    }

    fn busy_ledger() -> LedgerState {
        let mut state = LedgerState::new(dec!(64000.12), [Symbol::from("HOOD"), Symbol::from("CAH")]);
        state.set_position(Symbol::from("HOOD"), Position::long(dec!(12.34567891), dec!(21.5)));
        state.logs = (0..60).map(entry).collect();
        state
    }

    #[tokio::test]
    async fn first_load_persists_the_initial_ledger() {
        let store = MemoryStore::new();
        let initial = LedgerState::new(dec!(100000), [Symbol::from("WDC")]);

        let loaded = store.load_or_init(&initial).await.unwrap();
        assert_eq!(loaded, initial);
        assert_eq!(store.fetch().await.unwrap(), Some(initial));
    }

    #[tokio::test]
    async fn existing_ledger_wins_over_initial() {
        let store = MemoryStore::with_state(busy_ledger());
        let initial = LedgerState::new(dec!(100000), [Symbol::from("WDC")]);
        assert_eq!(store.load_or_init(&initial).await.unwrap().cash, dec!(64000.12));
    }

    #[tokio::test]
    async fn save_keeps_only_the_most_recent_logs() {
        let store = MemoryStore::new();
        let mut state = busy_ledger();
        store.save(&mut state).await.unwrap();

        let saved = store.fetch().await.unwrap().unwrap();
        assert_eq!(saved.logs.len(), 50);
        assert_eq!(saved.logs.first().unwrap().price, dec!(10));
        assert_eq!(saved.logs.last().unwrap().price, dec!(59));
        assert_eq!(saved, state);
    }

    #[tokio::test]
    async fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("ledger.json"));
        assert_eq!(store.fetch().await.unwrap(), None);

        let mut state = busy_ledger();
        store.save(&mut state).await.unwrap();

        let reloaded = FileStore::new(store.path()).fetch().await.unwrap().unwrap();
        assert_eq!(reloaded, state);
        assert_eq!(reloaded.position(&Symbol::from("HOOD")).shares, dec!(12.34567891));
        assert!(!dir.path().join("nested").join("ledger.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error_not_a_fresh_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "{not json").unwrap();

        let initial = LedgerState::new(dec!(100000), Vec::<Symbol>::new());
        let err = FileStore::new(&path).load_or_init(&initial).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = UnavailableStore::new("storage.url is not set");
        let mut state = LedgerState::new(dec!(100000), Vec::<Symbol>::new());
        assert!(store.load_or_init(&state).await.unwrap_err().is_not_configured());
        assert!(store.save(&mut state).await.unwrap_err().is_not_configured());
    }
}
