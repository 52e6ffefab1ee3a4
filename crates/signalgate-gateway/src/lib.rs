//! signalgate gateway library entry.
//!
//! Wires the metrics registry, the request-metrics middleware, the exposition
//! endpoint and the demo routes into one axum application. It is intended to
//! be consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod routes;
