// src/probe/result.rs
use serde::{Deserialize, Serialize};
use url::Url;

/// Outcome of a single probe. Exactly one is produced per target no matter
/// how the request ends. A transport-level failure populates `error`; a
/// response with the wrong status leaves `error` empty since `status_code`
/// already says what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub name: String,
    pub url: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub ok: bool,
}

impl ProbeResult {
    pub fn up(name: String, url: Url, status_code: u16) -> Self {
        Self {
            name,
            url,
            status_code: Some(status_code),
            error: None,
            ok: true,
        }
    }

    pub fn wrong_status(name: String, url: Url, status_code: u16) -> Self {
        Self {
            name,
            url,
            status_code: Some(status_code),
            error: None,
            ok: false,
        }
    }

    pub fn failed(name: String, url: Url, error: String) -> Self {
        Self {
            name,
            url,
            status_code: None,
            error: Some(error),
            ok: false,
        }
    }
}
