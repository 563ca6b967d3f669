// src/server/handler.rs
use crate::config::ConfigSource;
use crate::metrics::{MetricsCollector, MetricsRegistry};
use crate::server::routes;
use hyper::{Body, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use tower::Service;

/// Shared per-process state. Configuration itself is NOT held here; it is
/// re-read from the source on every request so live environment changes
/// take effect without a restart.
pub struct AppState {
    pub config: ConfigSource,
    pub metrics: Option<Arc<MetricsRegistry>>,
}

impl AppState {
    pub fn new(config: ConfigSource, metrics: Option<Arc<MetricsRegistry>>) -> Self {
        Self { config, metrics }
    }

    pub fn collector(&self) -> Option<Arc<MetricsCollector>> {
        self.metrics.as_ref().map(|registry| registry.collector())
    }
}

#[derive(Clone)]
pub struct RequestHandler {
    state: Arc<AppState>,
}

impl RequestHandler {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let state = self.state.clone();
        Box::pin(async move { Ok(routes::route(state, req).await) })
    }
}
