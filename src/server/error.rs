// src/server/error.rs
use hyper::{Body, Response, StatusCode};
use serde_json::json;

/// The only faults a caller ever sees. Probe, aggregation, and delivery
/// failures are all resolved into structured `ok:false` payloads before
/// they reach this layer; what remains is bad input and routing.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ApiError> for Response<Body> {
    fn from(err: ApiError) -> Self {
        let status = match err {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": err.to_string() }).to_string();

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap_or_else(|_| Response::new(Body::empty()))
    }
}
