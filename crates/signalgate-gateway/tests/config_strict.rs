#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use signalgate_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8000"
metrics:
  latency_bucket: [0.1, 1.0] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.metrics.latency_buckets.len(), 14);
    assert!(cfg.metrics.instrument_exposition);
}

#[test]
fn custom_metrics_section() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9100"
metrics:
  latency_buckets: [0.01, 0.1, 1]
  instrument_exposition: false
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9100);
    assert_eq!(cfg.metrics.latency_buckets, vec![0.01, 0.1, 1.0]);
    assert!(!cfg.metrics.instrument_exposition);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn invalid_listen_and_buckets_rejected() {
    let bad_listen = "version: 1\nserver:\n  listen: \"not-an-addr\"\n";
    let err = config::load_from_str(bad_listen).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let unsorted = "version: 1\nmetrics:\n  latency_buckets: [1.0, 0.5]\n";
    let err = config::load_from_str(unsorted).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let empty = "version: 1\nmetrics:\n  latency_buckets: []\n";
    assert!(config::load_from_str(empty).is_err());
}
