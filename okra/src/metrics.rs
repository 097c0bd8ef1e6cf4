//! Prometheus metrics for the OCR gateway.

use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};
use std::sync::Arc;

/// Process-wide request counters, injected through `AppState` so tests can
/// construct an isolated registry per case.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    pub requests_total: IntCounter,
    pub ocr_duration: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let requests_total = IntCounter::new(
            "okra_requests_total",
            "Total OCR requests received, including failed ones",
        )
        .expect("failed to create requests_total counter");

        let ocr_duration = Histogram::with_opts(
            HistogramOpts::new(
                "okra_ocr_duration_seconds",
                "Duration of the read+decode+recognize span per request",
            )
            .buckets(vec![
                0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
            ]),
        )
        .expect("failed to create ocr_duration histogram");

        registry
            .register(Box::new(requests_total.clone()))
            .expect("failed to register requests_total");
        registry
            .register(Box::new(ocr_duration.clone()))
            .expect("failed to register ocr_duration");

        Self {
            registry: Arc::new(registry),
            requests_total,
            ocr_duration,
        }
    }

    /// Record an incoming OCR request, regardless of its eventual outcome.
    pub fn record_request(&self) {
        self.requests_total.inc();
    }

    /// Record one observed read+decode+recognize span.
    pub fn observe_ocr_duration(&self, secs: f64) {
        self.ocr_duration.observe(secs);
    }

    /// Get Prometheus text output.
    pub fn gather(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
