//! Minimal metrics registry rendering the Prometheus text exposition format.
//!
//! Counter/gauge/histogram types are backed by atomics; labeled families keep
//! their series in a `DashMap` keyed by the label values. The label arity is a
//! const generic, so passing the wrong number of values is a compile error
//! rather than a runtime failure on the request path.

mod counter;
mod gauge;
mod histogram;
mod registry;

use std::fmt::Write;

pub use counter::CounterVec;
pub use gauge::Gauge;
pub use histogram::{validate_buckets, HistogramVec, DEFAULT_LATENCY_BUCKETS};
pub use registry::Registry;

/// A metric family that can be rendered under a registered name.
pub trait Collector: Send + Sync {
    /// Prometheus `# TYPE` keyword.
    fn kind(&self) -> &'static str;

    /// Declared label names, in rendering order.
    fn label_names(&self) -> &[&'static str];

    /// Append every series of this family to `out`.
    fn render(&self, name: &str, out: &mut String);
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `k1="v1",k2="v2"` without surrounding braces.
fn label_pairs(names: &[&str], values: &[String]) -> String {
    let mut s = String::new();
    for (i, (k, v)) in names.iter().zip(values).enumerate() {
        if i > 0 {
            s.push(',');
        }
        let _ = write!(s, "{}=\"{}\"", k, escape_label(v));
    }
    s
}

/// Write one sample line, omitting the braces for unlabeled series.
fn write_sample(out: &mut String, name: &str, labels: &str, value: impl std::fmt::Display) {
    if labels.is_empty() {
        let _ = writeln!(out, "{} {}", name, value);
    } else {
        let _ = writeln!(out, "{}{{{}}} {}", name, labels, value);
    }
}

/// Float formatting used by the Python and Go clients: integral values keep a
/// trailing `.0`, infinities are `+Inf`/`-Inf`.
fn format_float(v: f64) -> String {
    if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else if v.is_nan() {
        "NaN".into()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, and not reserved (`__` prefix).
fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    !name.starts_with("__") && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
