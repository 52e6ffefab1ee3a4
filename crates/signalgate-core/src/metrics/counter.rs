use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{label_pairs, write_sample, Collector};

/// Monotonic counter family with `N` labels.
#[derive(Debug)]
pub struct CounterVec<const N: usize> {
    label_names: [&'static str; N],
    series: DashMap<[String; N], AtomicU64>,
}

impl<const N: usize> CounterVec<N> {
    pub fn new(label_names: [&'static str; N]) -> Self {
        Self { label_names, series: DashMap::new() }
    }

    /// Increment by 1.
    pub fn inc(&self, values: [&str; N]) {
        self.add(values, 1);
    }

    /// Increment by an arbitrary value. The series is created on first use.
    pub fn add(&self, values: [&str; N], v: u64) {
        let key = values.map(str::to_owned);

        // Existing series only need a shard read lock.
        if let Some(counter) = self.series.get(&key) {
            counter.fetch_add(v, Ordering::Relaxed);
            return;
        }
        self.series
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never observed).
    pub fn get(&self, values: [&str; N]) -> u64 {
        let key = values.map(str::to_owned);
        self.series.get(&key).map(|c| c.load(Ordering::Relaxed)).unwrap_or(0)
    }

    /// Sum across every series.
    pub fn total(&self) -> u64 {
        self.series.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    /// Number of distinct label combinations seen so far.
    pub fn series_len(&self) -> usize {
        self.series.len()
    }
}

impl<const N: usize> Collector for CounterVec<N> {
    fn kind(&self) -> &'static str {
        "counter"
    }

    fn label_names(&self) -> &[&'static str] {
        &self.label_names
    }

    fn render(&self, name: &str, out: &mut String) {
        let mut rows: Vec<([String; N], u64)> = self
            .series
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, val) in rows {
            write_sample(out, name, &label_pairs(&self.label_names, &key), val);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_are_independent() {
        let c = CounterVec::new(["method", "status_code"]);
        c.inc(["GET", "200"]);
        c.inc(["GET", "200"]);
        c.add(["POST", "201"], 5);

        assert_eq!(c.get(["GET", "200"]), 2);
        assert_eq!(c.get(["POST", "201"]), 5);
        assert_eq!(c.get(["GET", "404"]), 0);
        assert_eq!(c.total(), 7);
        assert_eq!(c.series_len(), 2);
    }

    #[test]
    fn render_is_sorted_by_label_values() {
        let c = CounterVec::new(["endpoint"]);
        c.inc(["/b"]);
        c.inc(["/a"]);

        let mut out = String::new();
        c.render("hits", &mut out);
        assert_eq!(out, "hits{endpoint=\"/a\"} 1\nhits{endpoint=\"/b\"} 1\n");
    }
}
