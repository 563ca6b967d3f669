// src/metrics/collector.rs
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!(error = %e, "failed to encode metrics");
        }
        buffer
    }
}

pub struct MetricsCollector {
    pub probes_total: IntCounterVec,
    pub probe_duration_seconds: HistogramVec,
    pub reports_total: IntCounterVec,
    pub notifications_total: IntCounterVec,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let probes_total = IntCounterVec::new(
            Opts::new("relay_probes_total", "Total health probes issued"),
            &["target", "outcome"],
        )?;
        registry.register(Box::new(probes_total.clone()))?;

        let probe_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "relay_probe_duration_seconds",
                "Probe round-trip time in seconds",
            ),
            &["target"],
        )?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        let reports_total = IntCounterVec::new(
            Opts::new("relay_reports_total", "Aggregate health reports by verdict"),
            &["verdict"],
        )?;
        registry.register(Box::new(reports_total.clone()))?;

        let notifications_total = IntCounterVec::new(
            Opts::new(
                "relay_notifications_total",
                "Channel delivery attempts by outcome",
            ),
            &["channel", "outcome"],
        )?;
        registry.register(Box::new(notifications_total.clone()))?;

        Ok(Self {
            probes_total,
            probe_duration_seconds,
            reports_total,
            notifications_total,
        })
    }

    pub fn record_probe(&self, target: &str, ok: bool, duration: std::time::Duration) {
        let outcome = if ok { "ok" } else { "fail" };
        self.probes_total.with_label_values(&[target, outcome]).inc();
        self.probe_duration_seconds
            .with_label_values(&[target])
            .observe(duration.as_secs_f64());
    }

    pub fn record_report(&self, ok: bool) {
        let verdict = if ok { "ok" } else { "fail" };
        self.reports_total.with_label_values(&[verdict]).inc();
    }

    pub fn record_notification(&self, channel: &str, ok: bool) {
        let outcome = if ok { "delivered" } else { "failed" };
        self.notifications_total
            .with_label_values(&[channel, outcome])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_exposes_recorded_counters() {
        let registry = MetricsRegistry::new().unwrap();
        let collector = registry.collector();

        collector.record_probe("docling", false, std::time::Duration::from_millis(12));
        collector.record_report(false);
        collector.record_notification("discord", true);

        let text = String::from_utf8(registry.gather()).unwrap();
        assert!(text.contains("relay_probes_total"));
        assert!(text.contains("relay_reports_total"));
        assert!(text.contains("relay_notifications_total"));
    }
}
