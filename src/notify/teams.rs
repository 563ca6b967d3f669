// src/notify/teams.rs
use crate::config::TeamsConfig;
use crate::notify::channel::delivery_client;
use crate::notify::{Notifier, NotifyOutcome};
use async_trait::async_trait;
use serde_json::json;

/// Incoming-webhook delivery, plain text card. Success is the transport
/// status.
pub struct TeamsNotifier {
    webhook_url: Option<String>,
}

impl TeamsNotifier {
    pub fn new(webhook_url: Option<String>, fallback: &TeamsConfig) -> Self {
        Self {
            webhook_url: webhook_url.or_else(|| fallback.webhook_url.clone()),
        }
    }
}

#[async_trait]
impl Notifier for TeamsNotifier {
    fn name(&self) -> &'static str {
        "teams"
    }

    async fn deliver(&self, message: &str) -> NotifyOutcome {
        let webhook_url = match &self.webhook_url {
            Some(url) => url,
            None => return NotifyOutcome::error("Missing webhook_url"),
        };

        let payload = json!({ "text": message });

        match delivery_client().post(webhook_url).json(&payload).send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let ok = resp.status().is_success();
                let text = resp.text().await.unwrap_or_default();
                NotifyOutcome::text(status, ok, text)
            }
            Err(e) => NotifyOutcome::error(e.to_string()),
        }
    }
}
