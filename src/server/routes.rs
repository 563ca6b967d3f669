// src/server/routes.rs
use crate::health::{aggregate, failure_summary, AggregateReport};
use crate::notify::{
    channels_from_config, fan_out, DiscordNotifier, Notifier, SlackNotifier, TeamsNotifier,
};
use crate::probe::{ProbeExecutor, DEFAULT_PROBE_TIMEOUT_SECS};
use crate::server::error::ApiError;
use crate::server::handler::AppState;
use crate::targets::{self, HealthTarget};
use chrono::Utc;
use hyper::{Body, Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct HealthRequest {
    pub targets: Option<Vec<HealthTarget>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SlackRequest {
    pub bot_token: Option<String>,
    pub channel: Option<String>,
    pub text: String,
    pub blocks: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct DiscordRequest {
    pub webhook_url: Option<String>,
    pub content: String,
    pub username: Option<String>,
    pub embeds: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TeamsRequest {
    pub webhook_url: Option<String>,
    pub text: String,
}

pub async fn route(state: Arc<AppState>, req: Request<Body>) -> Response<Body> {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let span = info_span!("request", %request_id, %method, %path);

    async move {
        match dispatch(state, req).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "request rejected");
                err.into()
            }
        }
    }
    .instrument(span)
    .await
}

async fn dispatch(state: Arc<AppState>, req: Request<Body>) -> Result<Response<Body>, ApiError> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match (&method, path.as_str()) {
        (&Method::GET, "/health") => Ok(liveness()),
        (&Method::GET, "/metrics") => metrics(&state),
        (&Method::POST, "/health/services") => {
            let body: HealthRequest = read_json_or_default(req).await?;
            let config = state.config.load();
            let report = run_health_report(&state, &config, body).await;
            json_response(StatusCode::OK, &report)
        }
        (&Method::POST, "/health/notify-on-fail") => {
            let body: HealthRequest = read_json_or_default(req).await?;
            let config = state.config.load();
            let report = run_health_report(&state, &config, body).await;

            if !report.ok {
                let summary = failure_summary(&report);
                warn!(%summary, "health check failed, fanning out");
                let outcomes = fan_out(channels_from_config(&config), summary).await;
                if let Some(collector) = state.collector() {
                    for (channel, outcome) in &outcomes {
                        collector.record_notification(channel, outcome.ok);
                    }
                }
            }

            json_response(StatusCode::OK, &report)
        }
        (&Method::POST, "/notify/slack") => {
            let body: SlackRequest = read_json(req).await?;
            let config = state.config.load();
            let notifier =
                SlackNotifier::new(body.bot_token, body.channel, body.blocks, &config.slack);
            deliver_and_respond(&state, notifier, &body.text).await
        }
        (&Method::POST, "/notify/discord") => {
            let body: DiscordRequest = read_json(req).await?;
            let config = state.config.load();
            let notifier = DiscordNotifier::new(
                body.webhook_url,
                body.username,
                body.embeds,
                &config.discord,
            );
            deliver_and_respond(&state, notifier, &body.content).await
        }
        (&Method::POST, "/notify/teams") => {
            let body: TeamsRequest = read_json(req).await?;
            let config = state.config.load();
            let notifier = TeamsNotifier::new(body.webhook_url, &config.teams);
            deliver_and_respond(&state, notifier, &body.text).await
        }
        _ => Err(ApiError::NotFound),
    }
}

/// Full check pipeline: resolve targets, probe, aggregate. Never fails:
/// every probe outcome is a
/// `ProbeResult` and an empty target list is a failing (but valid) report.
async fn run_health_report(
    state: &AppState,
    config: &crate::config::Config,
    body: HealthRequest,
) -> AggregateReport {
    let resolved = targets::resolve(body.targets, config);
    let timeout = Duration::from_secs(body.timeout_secs.unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS));

    let executor = ProbeExecutor::new(timeout, state.collector());
    let results = executor.probe_all(resolved).await;
    let report = aggregate(results, Utc::now().timestamp());

    if let Some(collector) = state.collector() {
        collector.record_report(report.ok);
    }
    report
}

async fn deliver_and_respond<N: Notifier>(
    state: &AppState,
    notifier: N,
    message: &str,
) -> Result<Response<Body>, ApiError> {
    let outcome = notifier.deliver(message).await;
    if let Some(collector) = state.collector() {
        collector.record_notification(notifier.name(), outcome.ok);
    }
    json_response(StatusCode::OK, &outcome)
}

fn liveness() -> Response<Body> {
    let body = serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })
    .to_string();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

fn metrics(state: &AppState) -> Result<Response<Body>, ApiError> {
    let registry = state.metrics.as_ref().ok_or(ApiError::NotFound)?;

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain; version=0.0.4")
        .body(Body::from(registry.gather()))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

async fn read_json<T: DeserializeOwned>(req: Request<Body>) -> Result<T, ApiError> {
    let bytes = hyper::body::to_bytes(req.into_body())
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Empty bodies are allowed where every field has a default, so a bare
/// `POST /health/services` works.
async fn read_json_or_default<T: DeserializeOwned + Default>(
    req: Request<Body>,
) -> Result<T, ApiError> {
    let bytes = hyper::body::to_bytes(req.into_body())
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if bytes.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, ApiError> {
    let body = serde_json::to_vec(value).map_err(|e| ApiError::Internal(e.to_string()))?;

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
