use std::net::SocketAddr;

use serde::Deserialize;
use signalgate_core::error::{Result, SignalError};
use signalgate_core::metrics::{validate_buckets, DEFAULT_LATENCY_BUCKETS};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SignalError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            SignalError::BadRequest(format!("server.listen must be a valid socket address: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Upper bounds of the latency histogram, in seconds.
    #[serde(default = "default_latency_buckets")]
    pub latency_buckets: Vec<f64>,

    /// Whether `GET /metrics` is itself counted and timed.
    #[serde(default = "default_instrument_exposition")]
    pub instrument_exposition: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            latency_buckets: default_latency_buckets(),
            instrument_exposition: default_instrument_exposition(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        validate_buckets(&self.latency_buckets)
            .map_err(|e| SignalError::BadRequest(format!("metrics.latency_buckets: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_latency_buckets() -> Vec<f64> {
    DEFAULT_LATENCY_BUCKETS.to_vec()
}
fn default_instrument_exposition() -> bool {
    true
}
