//! signalgate core: transport-agnostic metrics registry and error types.
//!
//! This crate owns the counters, histograms and gauges behind the golden
//! signals and renders them in the Prometheus text exposition format. It knows
//! nothing about HTTP so it can be reused by any request pipeline.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Recording a sample never fails; only registration and construction return
//! `SignalError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{Result, SignalError};
