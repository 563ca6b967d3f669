// src/notify/discord.rs
use crate::config::DiscordConfig;
use crate::notify::channel::delivery_client;
use crate::notify::{Notifier, NotifyOutcome};
use async_trait::async_trait;
use serde_json::{json, Value};

const DEFAULT_USERNAME: &str = "health-relay";

/// Webhook delivery. Discord acknowledges with 204 and an empty body;
/// success is purely the transport status.
pub struct DiscordNotifier {
    webhook_url: Option<String>,
    username: String,
    embeds: Option<Value>,
}

impl DiscordNotifier {
    pub fn new(
        webhook_url: Option<String>,
        username: Option<String>,
        embeds: Option<Value>,
        fallback: &DiscordConfig,
    ) -> Self {
        Self {
            webhook_url: webhook_url.or_else(|| fallback.webhook_url.clone()),
            username: username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            embeds,
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn deliver(&self, message: &str) -> NotifyOutcome {
        let webhook_url = match &self.webhook_url {
            Some(url) => url,
            None => return NotifyOutcome::error("Missing webhook_url"),
        };

        let mut payload = json!({
            "content": message,
            "username": self.username,
        });
        if let Some(embeds) = &self.embeds {
            payload["embeds"] = embeds.clone();
        }

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
