//! Top-level facade crate for signalgate.
//!
//! Re-exports the metrics core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use signalgate_core::*;
}

pub mod gateway {
    pub use signalgate_gateway::*;
}
