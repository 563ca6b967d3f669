// src/targets/mod.rs
use crate::config::Config;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

pub const DEFAULT_EXPECT_STATUS: u16 = 200;

fn default_expect_status() -> u16 {
    DEFAULT_EXPECT_STATUS
}

/// One thing to check: a URL and the status code that means "alive".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthTarget {
    pub name: String,
    pub url: Url,
    #[serde(default = "default_expect_status")]
    pub expect_status: u16,
}

impl HealthTarget {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
            expect_status: DEFAULT_EXPECT_STATUS,
        }
    }
}

/// Build the probe list. A non-empty explicit list wins unmodified;
/// otherwise defaults are synthesized from whichever configured endpoints
/// are present, in a fixed priority order. Missing configuration shortens
/// the list rather than failing, possibly down to empty.
pub fn resolve(explicit: Option<Vec<HealthTarget>>, config: &Config) -> Vec<HealthTarget> {
    if let Some(targets) = explicit {
        if !targets.is_empty() {
            return targets;
        }
    }

    let endpoints = &config.endpoints;
    let mut targets = Vec::new();

    if let Some(url) = &endpoints.docling_url {
        push_default(&mut targets, "docling", url);
    }
    if let Some(url) = &endpoints.meili_url {
        push_default(&mut targets, "meilisearch", url);
    }
    if let Some(url) = &endpoints.qdrant_url {
        push_default(&mut targets, "qdrant", url);
    }
    if let Some(url) = &endpoints.neo4j_url {
        push_default(&mut targets, "neo4j", url);
    }
    if let Some(endpoint) = &endpoints.minio_endpoint {
        let scheme = if endpoints.minio_secure { "https" } else { "http" };
        let url = format!("{}://{}/minio/health/live", scheme, endpoint);
        push_default(&mut targets, "minio", &url);
    }

    targets
}

fn push_default(targets: &mut Vec<HealthTarget>, name: &str, raw: &str) {
    match raw.parse::<Url>() {
        Ok(url) => targets.push(HealthTarget::new(name, url)),
        Err(e) => warn!(target = name, error = %e, "skipping target with invalid URL"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;

    #[test]
    fn explicit_targets_pass_through_unmodified() {
        let explicit = vec![HealthTarget {
            name: "svc".into(),
            url: "http://svc/health".parse().unwrap(),
            expect_status: 204,
        }];
        let resolved = resolve(Some(explicit), &Config::default());

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "svc");
        assert_eq!(resolved[0].expect_status, 204);
    }

    #[test]
    fn empty_explicit_list_falls_back_to_config() {
        let config = Config {
            endpoints: EndpointConfig {
                qdrant_url: Some("http://qdrant:6333/healthz".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let resolved = resolve(Some(Vec::new()), &config);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "qdrant");
    }

    #[test]
    fn defaults_follow_priority_order() {
        let config = Config {
            endpoints: EndpointConfig {
                docling_url: Some("http://docling:5001/health".into()),
                meili_url: Some("http://meili:7700/health".into()),
                qdrant_url: Some("http://qdrant:6333/healthz".into()),
                neo4j_url: Some("http://neo4j:7474".into()),
                minio_endpoint: Some("minio:9000".into()),
                minio_secure: false,
            },
            ..Default::default()
        };

        let names: Vec<_> = resolve(None, &config)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec!["docling", "meilisearch", "qdrant", "neo4j", "minio"]
        );
    }

    #[test]
    fn minio_scheme_follows_secure_flag() {
        let mut config = Config {
            endpoints: EndpointConfig {
                minio_endpoint: Some("minio:9000".into()),
                minio_secure: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let resolved = resolve(None, &config);
        assert_eq!(
            resolved[0].url.as_str(),
            "http://minio:9000/minio/health/live"
        );

        config.endpoints.minio_secure = true;
        let resolved = resolve(None, &config);
        assert_eq!(
            resolved[0].url.as_str(),
            "https://minio:9000/minio/health/live"
        );
    }

    #[test]
    fn invalid_configured_url_is_skipped_not_fatal() {
        let config = Config {
            endpoints: EndpointConfig {
                docling_url: Some("not a url".into()),
                qdrant_url: Some("http://qdrant:6333/healthz".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let resolved = resolve(None, &config);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "qdrant");
    }

    #[test]
    fn no_configuration_yields_empty_list() {
        assert!(resolve(None, &Config::default()).is_empty());
    }

    #[test]
    fn expect_status_defaults_on_deserialize() {
        let target: HealthTarget =
            serde_json::from_str(r#"{"name":"svc","url":"http://svc/health"}"#).unwrap();
        assert_eq!(target.expect_status, 200);
    }
}
