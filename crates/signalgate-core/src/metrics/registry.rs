use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;

use super::{escape_help, is_valid_label_name, is_valid_metric_name, Collector};
use crate::error::{Result, SignalError};

struct Entry {
    name: String,
    help: String,
    collector: Arc<dyn Collector>,
}

/// Named collection of metric families.
///
/// Registration happens once at startup through `&mut self`; afterwards the
/// registry is shared read-only (typically in an `Arc`) and every family is
/// mutated through the handle returned by [`Registry::register`].
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
    names: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a family under `name` and return the shared handle used to
    /// record samples.
    pub fn register<C>(&mut self, name: &str, help: &str, collector: C) -> Result<Arc<C>>
    where
        C: Collector + 'static,
    {
        if !is_valid_metric_name(name) {
            return Err(SignalError::BadRequest(format!("invalid metric name: {name}")));
        }
        if let Some(bad) = collector.label_names().iter().find(|l| !is_valid_label_name(l)) {
            return Err(SignalError::BadRequest(format!(
                "invalid label name {bad:?} on metric {name}"
            )));
        }
        if !self.names.insert(name.to_string()) {
            return Err(SignalError::BadRequest(format!("metric already registered: {name}")));
        }

        let handle = Arc::new(collector);
        self.entries.push(Entry {
            name: name.to_string(),
            help: help.to_string(),
            collector: handle.clone(),
        });
        tracing::debug!(metric = %name, "metric registered");
        Ok(handle)
    }

    /// Render every family in registration order in Prometheus text
    /// exposition format (version 0.0.4).
    pub fn export(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            let _ = writeln!(out, "# HELP {} {}", e.name, escape_help(&e.help));
            let _ = writeln!(out, "# TYPE {} {}", e.name, e.collector.kind());
            e.collector.render(&e.name, &mut out);
        }
        out
    }

    /// Registered metric names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
