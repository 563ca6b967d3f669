// src/notify/channel.rs
use crate::notify::NotifyOutcome;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Hard cap on any single channel delivery. No retries, no backoff; a
/// failing channel is reported once.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(15);

/// One alert sink. Implementations resolve their own credentials and
/// report a structured outcome instead of raising; a channel with no
/// credentials fails locally without touching the network.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, message: &str) -> NotifyOutcome;
}

pub(super) fn delivery_client() -> Client {
    Client::builder()
        .timeout(DELIVERY_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}
