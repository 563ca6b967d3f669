// src/main.rs
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use health_relay::{
    config::ConfigSource,
    metrics::MetricsRegistry,
    server::{AppState, RequestHandler, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("health_relay=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    let addr: SocketAddr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0.0.0.0:7069".to_string())
        .parse()?;

    let metrics = Arc::new(MetricsRegistry::new()?);

    // Configuration stays env-sourced and is re-read on every request.
    let state = Arc::new(AppState::new(ConfigSource::Env, Some(metrics)));
    let handler = RequestHandler::new(state);

    info!("Starting health relay on {}", addr);

    ServerBuilder::new(addr).with_handler(handler).serve().await?;

    Ok(())
}
