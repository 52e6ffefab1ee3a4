//! Golden-signal observability for the HTTP surface.
//!
//! - `metrics`    : metric definitions (traffic, errors, latency, saturation)
//! - `middleware` : per-request interception that records them

pub mod metrics;
pub mod middleware;

pub use metrics::{HttpMetrics, UNMATCHED_ENDPOINT};
pub use middleware::track_metrics;
