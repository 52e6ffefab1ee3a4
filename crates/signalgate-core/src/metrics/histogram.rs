use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::{format_float, label_pairs, write_sample, Collector};
use crate::error::{Result, SignalError};

/// Default latency buckets in seconds (same set the Prometheus client
/// libraries ship with).
pub const DEFAULT_LATENCY_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

#[derive(Debug)]
struct AtomicHistogram {
    count: AtomicU64,
    sum_nanos: AtomicU64,
    buckets: Box<[AtomicU64]>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_nanos: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

/// Duration histogram family with `N` labels.
///
/// Bucket bounds are configured in seconds and compared in integer
/// nanoseconds; the sum is also kept in nanoseconds so every update is a
/// single `fetch_add`.
#[derive(Debug)]
pub struct HistogramVec<const N: usize> {
    label_names: [&'static str; N],
    bounds: Box<[f64]>,
    bounds_nanos: Box<[u64]>,
    series: DashMap<[String; N], AtomicHistogram>,
}

impl<const N: usize> HistogramVec<N> {
    /// Build a family with the given upper bounds (seconds, strictly
    /// increasing, finite, positive). `+Inf` is implicit.
    pub fn new(label_names: [&'static str; N], buckets: &[f64]) -> Result<Self> {
        validate_buckets(buckets)?;
        if label_names.contains(&"le") {
            return Err(SignalError::BadRequest(
                "histogram label name `le` is reserved".into(),
            ));
        }

        Ok(Self {
            label_names,
            bounds: buckets.into(),
            bounds_nanos: buckets.iter().map(|b| to_nanos(*b)).collect(),
            series: DashMap::new(),
        })
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, values: [&str; N], duration: Duration) {
        let key = values.map(str::to_owned);
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        if let Some(hist) = self.series.get(&key) {
            self.record(&hist, nanos);
            return;
        }
        let hist = self
            .series
            .entry(key)
            .or_insert_with(|| AtomicHistogram::new(self.bounds_nanos.len()));
        self.record(&hist, nanos);
    }

    fn record(&self, hist: &AtomicHistogram, nanos: u64) {
        // count first: a concurrent scrape never sees a finite bucket above +Inf.
        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_nanos.fetch_add(nanos, Ordering::Relaxed);

        // cumulative: every bucket whose bound is >= the value
        for (i, &b) in self.bounds_nanos.iter().enumerate() {
            if nanos <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Observation count of one series (0 if never observed).
    pub fn count(&self, values: [&str; N]) -> u64 {
        let key = values.map(str::to_owned);
        self.series.get(&key).map(|h| h.count.load(Ordering::Relaxed)).unwrap_or(0)
    }

    /// Sum of observed durations of one series.
    pub fn sum(&self, values: [&str; N]) -> Duration {
        let key = values.map(str::to_owned);
        self.series
            .get(&key)
            .map(|h| Duration::from_nanos(h.sum_nanos.load(Ordering::Relaxed)))
            .unwrap_or_default()
    }

    /// Cumulative bucket counts of one series, excluding `+Inf`.
    pub fn bucket_counts(&self, values: [&str; N]) -> Vec<u64> {
        let key = values.map(str::to_owned);
        match self.series.get(&key) {
            Some(h) => h.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect(),
            None => vec![0; self.bounds.len()],
        }
    }

    /// Observation count across every series.
    pub fn total_count(&self) -> u64 {
        self.series.iter().map(|r| r.value().count.load(Ordering::Relaxed)).sum()
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }
}

fn to_nanos(secs: f64) -> u64 {
    (secs * NANOS_PER_SEC).round() as u64
}

/// Check that bucket bounds are non-empty, finite, at least 1ns and strictly
/// increasing once rounded to nanoseconds.
pub fn validate_buckets(buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(SignalError::BadRequest("histogram buckets must not be empty".into()));
    }
    if buckets.iter().any(|b| !b.is_finite() || *b <= 0.0) {
        return Err(SignalError::BadRequest(
            "histogram buckets must be finite and positive".into(),
        ));
    }
    // Bounds are compared in whole nanoseconds, so check them at that resolution.
    let nanos: Vec<u64> = buckets.iter().map(|b| to_nanos(*b)).collect();
    if nanos[0] == 0 {
        return Err(SignalError::BadRequest(
            "histogram buckets must be at least 1ns".into(),
        ));
    }
    if nanos.windows(2).any(|w| w[0] >= w[1]) {
        return Err(SignalError::BadRequest(
            "histogram buckets must be strictly increasing".into(),
        ));
    }
    Ok(())
}

impl<const N: usize> Collector for HistogramVec<N> {
    fn kind(&self) -> &'static str {
        "histogram"
    }

    fn label_names(&self) -> &[&'static str] {
        &self.label_names
    }

    fn render(&self, name: &str, out: &mut String) {
        let mut keys: Vec<[String; N]> = self.series.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        let bucket_name = format!("{}_bucket", name);
        let sum_name = format!("{}_sum", name);
        let count_name = format!("{}_count", name);

        for key in keys {
            let Some(hist) = self.series.get(&key) else { continue };
            let label_str = label_pairs(&self.label_names, &key);
            let prefix = if label_str.is_empty() { String::new() } else { format!("{},", label_str) };

            for (i, &le) in self.bounds.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let labels = format!("{}le=\"{}\"", prefix, format_float(le));
                write_sample(out, &bucket_name, &labels, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            write_sample(out, &bucket_name, &format!("{}le=\"+Inf\"", prefix), count);

            let sum = hist.sum_nanos.load(Ordering::Relaxed) as f64 / NANOS_PER_SEC;
            write_sample(out, &sum_name, &label_str, format_float(sum));
            write_sample(out, &count_name, &label_str, count);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_cumulative() {
        let h = HistogramVec::new(["endpoint"], &[0.01, 0.1, 1.0]).unwrap();
        h.observe(["/"], Duration::from_millis(5));
        h.observe(["/"], Duration::from_millis(50));
        h.observe(["/"], Duration::from_secs(3));

        assert_eq!(h.bucket_counts(["/"]), vec![1, 2, 2]);
        assert_eq!(h.count(["/"]), 3);
        assert_eq!(h.sum(["/"]), Duration::from_millis(3055));
    }

    #[test]
    fn value_on_bound_lands_in_that_bucket() {
        let h = HistogramVec::new(["endpoint"], &[0.1, 1.0]).unwrap();
        h.observe(["/"], Duration::from_millis(100));
        assert_eq!(h.bucket_counts(["/"]), vec![1, 1]);
    }

    #[test]
    fn invalid_buckets_rejected() {
        assert!(HistogramVec::new(["endpoint"], &[]).is_err());
        assert!(HistogramVec::new(["endpoint"], &[0.5, 0.1]).is_err());
        assert!(HistogramVec::new(["endpoint"], &[0.1, 0.1]).is_err());
        assert!(HistogramVec::new(["endpoint"], &[0.0, 1.0]).is_err());
        assert!(HistogramVec::new(["endpoint"], &[1.0, f64::INFINITY]).is_err());
        assert!(HistogramVec::new(["le"], &[1.0]).is_err());
    }

    #[test]
    fn sub_nanosecond_bounds_rejected() {
        assert!(validate_buckets(&[1e-10, 2e-10]).is_err());
        // distinct as f64 but equal once rounded to nanoseconds
        assert!(validate_buckets(&[1e-9, 1.2e-9]).is_err());
        assert!(validate_buckets(&[1e-9, 2e-9]).is_ok());
    }

    #[test]
    fn render_emits_buckets_sum_and_count() {
        let h = HistogramVec::new(["endpoint"], &[0.5, 1.0]).unwrap();
        h.observe(["/x"], Duration::from_millis(250));

        let mut out = String::new();
        h.render("lat", &mut out);
        let expected = "\
lat_bucket{endpoint=\"/x\",le=\"0.5\"} 1
lat_bucket{endpoint=\"/x\",le=\"1.0\"} 1
lat_bucket{endpoint=\"/x\",le=\"+Inf\"} 1
lat_sum{endpoint=\"/x\"} 0.25
lat_count{endpoint=\"/x\"} 1
";
        assert_eq!(out, expected);
    }
}
