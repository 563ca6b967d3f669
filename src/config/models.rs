// src/config/models.rs
use serde::{Deserialize, Serialize};

/// Everything the service reads from its environment, assembled once per
/// request so probes and deliveries see live values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub slack: SlackConfig,
    pub discord: DiscordConfig,
    pub teams: TeamsConfig,
}

/// Default probe targets. Any endpoint left unset simply contributes no
/// target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub docling_url: Option<String>,
    pub meili_url: Option<String>,
    pub qdrant_url: Option<String>,
    pub neo4j_url: Option<String>,
    /// host:port, scheme selected by `minio_secure`
    pub minio_endpoint: Option<String>,
    pub minio_secure: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackConfig {
    pub bot_token: Option<String>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamsConfig {
    pub webhook_url: Option<String>,
}
