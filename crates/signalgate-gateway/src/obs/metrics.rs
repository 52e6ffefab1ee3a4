//! The four golden signals, registered once per process.

use std::sync::Arc;

use signalgate_core::error::Result;
use signalgate_core::metrics::{CounterVec, Gauge, HistogramVec, Registry};

/// Endpoint label used when no route template matched, so unknown paths
/// collapse into a single series.
pub const UNMATCHED_ENDPOINT: &str = "<unmatched>";

/// Request metrics shared by the middleware and the `/metrics` handler.
pub struct HttpMetrics {
    registry: Registry,
    /// Traffic: `method`, `endpoint`, `status_code`.
    pub request_count: Arc<CounterVec<3>>,
    /// Errors: `method`, `endpoint`, `status_code`.
    pub error_count: Arc<CounterVec<3>>,
    /// Latency: `endpoint`.
    pub request_latency: Arc<HistogramVec<1>>,
    /// Saturation: requests currently in flight.
    pub active_requests: Arc<Gauge>,
}

impl HttpMetrics {
    pub fn new(latency_buckets: &[f64]) -> Result<Self> {
        let mut registry = Registry::new();

        let request_count = registry.register(
            "request_count",
            "Number of requests",
            CounterVec::new(["method", "endpoint", "status_code"]),
        )?;
        let request_latency = registry.register(
            "request_latency_seconds",
            "Request latency",
            HistogramVec::new(["endpoint"], latency_buckets)?,
        )?;
        let error_count = registry.register(
            "error_count",
            "Number of errors",
            CounterVec::new(["method", "endpoint", "status_code"]),
        )?;
        let active_requests =
            registry.register("active_requests", "Active requests in system", Gauge::new())?;

        Ok(Self {
            registry,
            request_count,
            error_count,
            request_latency,
            active_requests,
        })
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.registry.export()
    }
}
