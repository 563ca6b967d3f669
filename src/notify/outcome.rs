// src/notify/outcome.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one delivery attempt on one channel.
///
/// `status` is the transport status code when a request completed;
/// a configuration or connection failure leaves it unset. The detail key
/// varies by channel: Discord and Teams report the raw response `text`,
/// Slack reports the parsed response `data`, and local failures carry an
/// `error` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(flatten)]
    pub detail: OutcomeDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomeDetail {
    Text { text: String },
    Data { data: Value },
    Error { error: String },
}

impl NotifyOutcome {
    pub fn text(status: u16, ok: bool, text: String) -> Self {
        Self {
            ok,
            status: Some(status),
            detail: OutcomeDetail::Text { text },
        }
    }

    pub fn data(status: u16, ok: bool, data: Value) -> Self {
        Self {
            ok,
            status: Some(status),
            detail: OutcomeDetail::Data { data },
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: None,
            detail: OutcomeDetail::Error {
                error: error.into(),
            },
        }
    }

    pub fn error_with_status(status: u16, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: Some(status),
            detail: OutcomeDetail::Error {
                error: error.into(),
            },
        }
    }
}
