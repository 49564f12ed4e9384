// In crates/database/src/memory.rs

use crate::{Error, Result, StateStore};
use async_trait::async_trait;
use core_types::LedgerState;
use tokio::sync::RwLock;

/// Process-local store; state is lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Option<LedgerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: RwLock::new(Some(state)),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    fn name(&self) -> &'static str {
        "Memory"
    }

    async fn fetch(&self) -> Result<Option<LedgerState>> {
        Ok(self.state.read().await.clone())
    }

    async fn store(&self, state: &LedgerState) -> Result<()> {
        *self.state.write().await = Some(state.clone());
        Ok(())
    }
}

/// Stands in when persistence is not configured: every operation fails with
/// `Error::NotConfigured`, so cycles report failure instead of silently
/// trading on a ledger nobody keeps.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl StateStore for UnavailableStore {
    fn name(&self) -> &'static str {
        "Unavailable"
    }

    async fn fetch(&self) -> Result<Option<LedgerState>> {
        Err(Error::NotConfigured(self.reason.clone()))
    }

    async fn store(&self, _state: &LedgerState) -> Result<()> {
        Err(Error::NotConfigured(self.reason.clone()))
    }
}
