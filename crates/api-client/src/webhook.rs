// In crates/api-client/src/webhook.rs

use crate::types::WebhookMessage;
use crate::{Error, Result};
use async_trait::async_trait;
use events::Notifier;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinSet;

/// Posts each notification as `{"content": text}` to a chat webhook.
///
/// Delivery happens on a background task; `notify` never waits for the
/// network and failures only reach the log. Short-lived processes call
/// `flush` before exiting so pending posts are not cut off.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
    pending: Arc<Mutex<JoinSet<()>>>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            pending: Arc::new(Mutex::new(JoinSet::new())),
        })
    }

    async fn deliver(client: Client, url: String, text: String) {
        let body = WebhookMessage { content: &text };
        match client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Webhook notification delivered.");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Webhook rejected notification.");
            }
            Err(e) => tracing::warn!(error = %e, "Webhook notification failed."),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "WebhookNotifier"
    }

    async fn notify(&self, text: &str) {
        let delivery = Self::deliver(self.client.clone(), self.url.clone(), text.to_string());
        match self.pending.lock() {
            Ok(mut pending) => {
                while pending.try_join_next().is_some() {}
                pending.spawn(delivery);
            }
            Err(_) => {
                tokio::spawn(delivery);
            }
        }
    }

    async fn flush(&self, timeout: Duration) {
        let mut pending = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return,
        };
        if pending.is_empty() {
            return;
        }

        let outstanding = pending.len();
        let drained = tokio::time::timeout(timeout, async {
            while pending.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            tracing::warn!(outstanding, ?timeout, "Webhook deliveries still pending at shutdown.");
        }
    }
}
