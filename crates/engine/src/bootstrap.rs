// In crates/engine/src/bootstrap.rs

use crate::Engine;
use anyhow::Context;
use api_client::{WebhookNotifier, YahooClient};
use app_config::{Settings, StorageBackend};
use database::{FileStore, MemoryStore, StateStore, UnavailableStore};
use events::LogNotifier;
use std::sync::Arc;

/// Wires the concrete adapters named in `settings` into an engine.
///
/// A postgres backend without a URL does not fail here: the engine gets an
/// always-unavailable store and every cycle reports the missing configuration.
pub async fn build_engine(settings: Settings) -> anyhow::Result<Engine> {
    let provider = Arc::new(YahooClient::new(&settings.market_data).context("building market data client")?);
    let store = open_store(&settings).await?;
    tracing::info!(store = store.name(), provider = "YahooClient", "Engine components ready.");

    let webhook = settings.notifications.webhook_url.clone();
    let mut engine = Engine::new(settings, provider, store)?.with_notifier(Arc::new(LogNotifier));
    if let Some(url) = webhook.filter(|url| !url.trim().is_empty()) {
        engine = engine.with_notifier(Arc::new(WebhookNotifier::new(url)?));
    }
    Ok(engine)
}

pub async fn open_store(settings: &Settings) -> anyhow::Result<Arc<dyn StateStore>> {
    let store: Arc<dyn StateStore> = match settings.storage.backend {
        StorageBackend::Postgres => match database::connect(&settings.storage).await {
            Ok(db) => Arc::new(db),
            Err(e) if e.is_not_configured() => {
                tracing::warn!(reason = %e, "Persistence disabled.");
                Arc::new(UnavailableStore::new(e.to_string()))
            }
            Err(e) => return Err(e).context("connecting to the ledger database"),
        },
        StorageBackend::File => Arc::new(FileStore::new(settings.storage.path.clone())),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
