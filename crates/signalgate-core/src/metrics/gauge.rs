use std::sync::atomic::{AtomicI64, Ordering};

use super::{write_sample, Collector};

/// Unlabeled gauge. Not clamped at zero; callers pair `inc` with `dec`.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Decrement by 1.
    pub fn dec(&self) {
        self.add(-1);
    }

    /// Add an arbitrary signed delta.
    pub fn add(&self, v: i64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Collector for Gauge {
    fn kind(&self) -> &'static str {
        "gauge"
    }

    fn label_names(&self) -> &[&'static str] {
        &[]
    }

    fn render(&self, name: &str, out: &mut String) {
        write_sample(out, name, "", self.get());
    }
}
