// src/config/mod.rs
mod models;

pub use models::*;

use std::env;
use std::sync::Arc;

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_bool(key: &str) -> bool {
    matches!(
        env::var(key).unwrap_or_default().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Read the current process environment. Called per request, never
    /// cached, so redeployed configuration takes effect without a restart.
    pub fn from_env() -> Self {
        Self {
            endpoints: EndpointConfig {
                docling_url: env_opt("DOCLING_URL"),
                meili_url: env_opt("MEILI_URL"),
                qdrant_url: env_opt("QDRANT_URL"),
                neo4j_url: env_opt("NEO4J_URL"),
                minio_endpoint: env_opt("MINIO_ENDPOINT"),
                minio_secure: env_bool("MINIO_SECURE"),
            },
            slack: SlackConfig {
                bot_token: env_opt("SLACK_BOT_TOKEN"),
                channel: env_opt("SLACK_CHANNEL"),
            },
            discord: DiscordConfig {
                webhook_url: env_opt("DISCORD_WEBHOOK_URL"),
            },
            teams: TeamsConfig {
                webhook_url: env_opt("TEAMS_WEBHOOK_URL"),
            },
        }
    }
}

/// Where a request's configuration comes from. Production uses `Env`;
/// tests inject a `Fixed` config instead of mutating the process
/// environment.
#[derive(Clone)]
pub enum ConfigSource {
    Env,
    Fixed(Arc<Config>),
}

impl ConfigSource {
    pub fn load(&self) -> Config {
        match self {
            ConfigSource::Env => Config::from_env(),
            ConfigSource::Fixed(config) => (**config).clone(),
        }
    }
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Env => write!(f, "ConfigSource::Env"),
            ConfigSource::Fixed(_) => write!(f, "ConfigSource::Fixed"),
        }
    }
}
