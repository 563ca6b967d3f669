// src/notify/slack.rs
use crate::config::SlackConfig;
use crate::notify::channel::delivery_client;
use crate::notify::{Notifier, NotifyOutcome};
use async_trait::async_trait;
use serde_json::{json, Value};

const SLACK_API_URL: &str = "https://slack.com/api/chat.postMessage";

/// Channel used when neither the request nor the environment names one.
pub const DEFAULT_SLACK_CHANNEL: &str = "#ops-alerts";

/// Bot-token delivery through `chat.postMessage`. Slack responds 200 even
/// for rejected messages, so the `ok` flag inside the response body decides
/// success together with the transport status.
pub struct SlackNotifier {
    token: Option<String>,
    channel: String,
    blocks: Option<Value>,
    api_url: String,
}

impl SlackNotifier {
    pub fn new(
        token: Option<String>,
        channel: Option<String>,
        blocks: Option<Value>,
        fallback: &SlackConfig,
    ) -> Self {
        Self {
            token: token.or_else(|| fallback.bot_token.clone()),
            channel: channel
                .or_else(|| fallback.channel.clone())
                .unwrap_or_else(|| DEFAULT_SLACK_CHANNEL.to_string()),
            blocks,
            api_url: SLACK_API_URL.to_string(),
        }
    }

    /// Point at a different API host (tests, enterprise proxies).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn deliver(&self, message: &str) -> NotifyOutcome {
        let token = match &self.token {
            Some(token) => token,
            None => return NotifyOutcome::error("Missing bot_token or channel"),
        };

        let mut payload = json!({
            "channel": self.channel,
            "text": message,
        });
        if let Some(blocks) = &self.blocks {
            payload["blocks"] = blocks.clone();
        }

        let response = delivery_client()
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let transport_ok = resp.status().is_success();
                match resp.json::<Value>().await {
                    Ok(data) => {
                        let accepted = data.get("ok").and_then(Value::as_bool).unwrap_or(false);
                        NotifyOutcome::data(status, transport_ok && accepted, data)
                    }
                    Err(e) => NotifyOutcome::error_with_status(
                        status,
                        format!("invalid response body: {}", e),
                    ),
                }
            }
            Err(e) => NotifyOutcome::error(e.to_string()),
        }
    }
}
