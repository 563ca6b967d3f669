// src/probe/executor.rs
use crate::metrics::MetricsCollector;
use crate::probe::ProbeResult;
use crate::targets::HealthTarget;
use reqwest::Client;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 8;

/// Issues one bounded GET per target and turns every outcome (success,
/// wrong status, transport failure, timeout) into a `ProbeResult`.
/// Nothing escapes as an error.
pub struct ProbeExecutor {
    client: Client,
    timeout: Duration,
    metrics: Option<Arc<MetricsCollector>>,
}

impl ProbeExecutor {
    pub fn new(timeout: Duration, metrics: Option<Arc<MetricsCollector>>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            timeout,
            metrics,
        }
    }

    /// Probe every target concurrently, one task each, with independent
    /// timeouts. Results come back in input order and total wall clock is
    /// bounded by the slowest single probe, not the sum.
    pub async fn probe_all(&self, targets: Vec<HealthTarget>) -> Vec<ProbeResult> {
        let mut tasks = Vec::with_capacity(targets.len());

        for target in targets {
            let client = self.client.clone();
            let probe_timeout = self.timeout;
            let metrics = self.metrics.clone();
            let fallback = (target.name.clone(), target.url.clone());

            let task = tokio::spawn(async move {
                probe_one(&client, probe_timeout, metrics, target).await
            });
            tasks.push((task, fallback));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for (task, (name, url)) in tasks {
            let result = match task.await {
                Ok(result) => result,
                // A panicked probe task still owes its target a result.
                Err(e) => {
                    warn!(target = %name, error = %e, "probe task failed");
                    ProbeResult::failed(name, url, "probe task failed".to_string())
                }
            };
            results.push(result);
        }

        results
    }
}

async fn probe_one(
    client: &Client,
    probe_timeout: Duration,
    metrics: Option<Arc<MetricsCollector>>,
    target: HealthTarget,
) -> ProbeResult {
    let started = std::time::Instant::now();

    let outcome = timeout(probe_timeout, client.get(target.url.clone()).send()).await;
    let elapsed = started.elapsed();
    let elapsed_ms = elapsed.as_millis() as u64;

    let result = match outcome {
        Ok(Ok(response)) => {
            let status = response.status().as_u16();
            if status == target.expect_status {
                ProbeResult::up(target.name, target.url, status)
            } else {
                ProbeResult::wrong_status(target.name, target.url, status)
            }
        }
        Ok(Err(e)) => ProbeResult::failed(target.name, target.url, short_error(&e)),
        Err(_) => ProbeResult::failed(target.name, target.url, "request timed out".to_string()),
    };

    if let Some(metrics) = &metrics {
        metrics.record_probe(&result.name, result.ok, elapsed);
    }

    if result.ok {
        debug!(target = %result.name, elapsed_ms, "probe ok");
    } else {
        warn!(
            target = %result.name,
            status = ?result.status_code,
            error = ?result.error,
            elapsed_ms,
            "probe failed"
        );
    }

    result
}

/// reqwest errors chain their sources into very long strings; keep the
/// top-level description only.
fn short_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", source_message(e))
    } else {
        e.to_string()
    }
}

fn source_message(e: &reqwest::Error) -> String {
    use std::error::Error;
    e.source().map(|s| s.to_string()).unwrap_or_else(|| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::HealthTarget;
    use url::Url;

    fn executor() -> ProbeExecutor {
        ProbeExecutor::new(Duration::from_secs(2), None)
    }

    fn url(raw: impl AsRef<str>) -> Url {
        raw.as_ref().parse().unwrap()
    }

    #[tokio::test]
    async fn matching_status_is_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body("OK")
            .create_async()
            .await;

        let target = HealthTarget::new("docling", url(format!("{}/health", server.url())));
        let results = executor().probe_all(vec![target]).await;

        mock.assert_async().await;
        assert_eq!(results.len(), 1);
        assert!(results[0].ok);
        assert_eq!(results[0].status_code, Some(200));
        assert!(results[0].error.is_none());
    }

    #[tokio::test]
    async fn wrong_status_reports_code_without_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(500)
            .create_async()
            .await;

        let target = HealthTarget::new("docling", url(format!("{}/health", server.url())));
        let results = executor().probe_all(vec![target]).await;

        assert!(!results[0].ok);
        assert_eq!(results[0].status_code, Some(500));
        assert!(results[0].error.is_none());
    }

    #[tokio::test]
    async fn custom_expect_status_is_honored() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ready")
            .with_status(204)
            .create_async()
            .await;

        let target = HealthTarget {
            name: "svc".into(),
            url: url(format!("{}/ready", server.url())),
            expect_status: 204,
        };
        let results = executor().probe_all(vec![target]).await;

        assert!(results[0].ok);
        assert_eq!(results[0].status_code, Some(204));
    }

    #[tokio::test]
    async fn connection_failure_populates_error() {
        // Nothing listens on port 1.
        let target = HealthTarget::new("ghost", url("http://127.0.0.1:1/health"));
        let results = executor().probe_all(vec![target]).await;

        assert_eq!(results.len(), 1);
        assert!(!results[0].ok);
        assert!(results[0].status_code.is_none());
        assert!(results[0].error.is_some());
    }

    #[tokio::test]
    async fn unresponsive_endpoint_times_out() {
        // Bind but never accept, so the connection hangs until the timeout.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let executor = ProbeExecutor::new(Duration::from_millis(300), None);
        let target = HealthTarget::new("hung", url(format!("http://{}/health", addr)));
        let results = executor.probe_all(vec![target]).await;

        drop(listener);
        assert!(!results[0].ok);
        assert_eq!(results[0].error.as_deref(), Some("request timed out"));
    }

    #[tokio::test]
    async fn results_preserve_input_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("GET", "/b")
            .with_status(503)
            .create_async()
            .await;

        let targets = vec![
            HealthTarget::new("a", url(format!("{}/a", server.url()))),
            HealthTarget::new("broken", url("http://127.0.0.1:1/")),
            HealthTarget::new("b", url(format!("{}/b", server.url()))),
        ];
        let results = executor().probe_all(targets).await;

        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "broken", "b"]);
        assert!(results[0].ok);
        assert!(!results[1].ok);
        assert_eq!(results[2].status_code, Some(503));
    }
}
