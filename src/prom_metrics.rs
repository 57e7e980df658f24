//! # Prometheus Metrics — Exposition for Container Orchestration
//!
//! Exposes rollcall operational metrics in the Prometheus text exposition
//! format for scraping by Prometheus, Grafana Agent, or any
//! OpenMetrics-compatible collector.
//!
//! ## Metrics Exposed
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `rollcall_http_request_duration_seconds` | Histogram | `method`, `path` | Request latency by route |
//! | `rollcall_voters_registered_total` | Counter | — | Voters registered since start |
//! | `rollcall_voters_total` | Gauge | — | Current registry size |
//!
//! ## Integration
//!
//! The histogram is fed by the request middleware; the registry-size gauge is
//! refreshed by the server's 30-second background loop. The `/metrics`
//! endpoint renders the current registry state on each scrape.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

/// Label set for the per-route latency histogram. `path` is normalized (id
/// segments collapsed) to keep label cardinality bounded.
#[derive(Clone, Debug, Hash, PartialEq, Eq, prometheus_client::encoding::EncodeLabelSet)]
pub struct HttpLabel {
    pub method: String,
    pub path: String,
}

/// Thread-safe metrics registry for the rollcall server.
///
/// All fields use atomic types and are safe to update from any thread or
/// async task. The `Family` type creates per-label-set instances on first use.
pub struct Metrics {
    pub registry: Registry,
    pub http_request_duration: Family<HttpLabel, Histogram>,
    pub voters_registered: Counter,
    pub voters_total: Gauge,
}

impl Metrics {
    /// Create a new metrics registry with all rollcall metrics registered.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_request_duration = Family::<HttpLabel, Histogram>::new_with_constructor(|| {
            Histogram::new(exponential_buckets(0.001, 2.0, 14))
        });
        registry.register(
            "rollcall_http_request_duration_seconds",
            "HTTP request duration by method and route",
            http_request_duration.clone(),
        );

        let voters_registered = Counter::default();
        registry.register(
            "rollcall_voters_registered",
            "Voters registered since process start",
            voters_registered.clone(),
        );

        let voters_total = Gauge::default();
        registry.register(
            "rollcall_voters_total",
            "Current number of voter records",
            voters_total.clone(),
        );

        Self {
            registry,
            http_request_duration,
            voters_registered,
            voters_total,
        }
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = String::new();
        encode(&mut buf, &self.registry).expect("encoding metrics should not fail");
        buf
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
