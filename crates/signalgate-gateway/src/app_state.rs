//! Shared application state for the signalgate gateway.
//!
//! The metrics registry is built here once and handed to the middleware and
//! the `/metrics` handler through axum state.

use std::sync::Arc;

use signalgate_core::error::Result;

use crate::config::GatewayConfig;
use crate::obs::HttpMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<HttpMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let metrics = HttpMetrics::new(&cfg.metrics.latency_buckets)?;

        tracing::info!(
            buckets = cfg.metrics.latency_buckets.len(),
            instrument_exposition = cfg.metrics.instrument_exposition,
            "metrics registry initialized"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics: Arc::new(metrics),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<HttpMetrics> {
        Arc::clone(&self.metrics)
    }
}
