#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use signalgate_core::metrics::{CounterVec, Gauge, HistogramVec, Registry};

#[test]
fn export_renders_help_type_and_series() {
    let mut reg = Registry::new();
    let requests = reg
        .register("request_count", "Number of requests", CounterVec::new(["method", "endpoint"]))
        .unwrap();
    let active = reg.register("active_requests", "Active requests in system", Gauge::new()).unwrap();
    let latency = reg
        .register(
            "request_latency_seconds",
            "Request latency",
            HistogramVec::new(["endpoint"], &[0.1, 1.0]).unwrap(),
        )
        .unwrap();

    requests.inc(["GET", "/"]);
    active.inc();
    latency.observe(["/"], Duration::from_millis(20));

    let expected = "\
# HELP request_count Number of requests
# TYPE request_count counter
request_count{method=\"GET\",endpoint=\"/\"} 1
# HELP active_requests Active requests in system
# TYPE active_requests gauge
active_requests 1
# HELP request_latency_seconds Request latency
# TYPE request_latency_seconds histogram
request_latency_seconds_bucket{endpoint=\"/\",le=\"0.1\"} 1
request_latency_seconds_bucket{endpoint=\"/\",le=\"1.0\"} 1
request_latency_seconds_bucket{endpoint=\"/\",le=\"+Inf\"} 1
request_latency_seconds_sum{endpoint=\"/\"} 0.02
request_latency_seconds_count{endpoint=\"/\"} 1
";
    assert_eq!(reg.export(), expected);
}

#[test]
fn families_without_samples_render_headers_only() {
    let mut reg = Registry::new();
    reg.register("error_count", "Number of errors", CounterVec::new(["endpoint"])).unwrap();
    assert_eq!(
        reg.export(),
        "# HELP error_count Number of errors\n# TYPE error_count counter\n"
    );
}

#[test]
fn duplicate_and_invalid_names_rejected() {
    let mut reg = Registry::new();
    reg.register("hits", "", Gauge::new()).unwrap();

    let err = reg.register("hits", "", Gauge::new()).err().expect("duplicate must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    assert!(reg.register("bad-name", "", Gauge::new()).is_err());
    assert!(reg.register("ok_name", "", CounterVec::new(["__x"])).is_err());
    assert_eq!(reg.names().collect::<Vec<_>>(), vec!["hits"]);
}

#[test]
fn concurrent_updates_are_not_lost() {
    const THREADS: usize = 8;
    const PER_THREAD: u64 = 1_000;

    let mut reg = Registry::new();
    let counter: Arc<CounterVec<1>> =
        reg.register("c", "", CounterVec::new(["endpoint"])).unwrap();
    let gauge = reg.register("g", "", Gauge::new()).unwrap();
    let hist = reg
        .register("h", "", HistogramVec::new(["endpoint"], &[0.001, 1.0]).unwrap())
        .unwrap();

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..PER_THREAD {
                    gauge.inc();
                    counter.inc(["/same"]);
                    hist.observe(["/same"], Duration::from_micros(10));
                    gauge.dec();
                }
            });
        }
    });

    let n = THREADS as u64 * PER_THREAD;
    assert_eq!(counter.get(["/same"]), n);
    assert_eq!(hist.count(["/same"]), n);
    assert_eq!(hist.bucket_counts(["/same"]), vec![n, n]);
    assert_eq!(gauge.get(), 0);
}
