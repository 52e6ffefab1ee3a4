//! Gateway config loader (strict parsing).
//!
//! The config file is optional; without one the gateway runs on
//! [`GatewayConfig::default`].

pub mod schema;

use std::fs;

use signalgate_core::error::{Result, SignalError};

pub use schema::{GatewayConfig, MetricsSection, ServerSection};

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SignalError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| SignalError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
