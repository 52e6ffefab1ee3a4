//! Request interception recording the golden signals.
//!
//! Every request passing through [`track_metrics`] is bracketed by an
//! [`InFlight`] guard: entry bumps `active_requests`, and dropping the guard
//! observes latency and decrements the gauge. The guard drops on every exit
//! path (normal return, panic unwinding, or the request future being
//! cancelled), so gauge and histogram stay balanced.
//!
//! Outcome labels, decided by the response tags `ApiError` inserts:
//! - no tag                            -> request_count only, actual status
//! - [`Recognized`] tag                -> request_count + error_count, declared status
//! - [`Fault`] tag or handler panic    -> request_count + error_count, status 500;
//!   a panic is resumed after recording
//!
//! Untagged framework rejections (e.g. axum's 405) count as plain responses.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;

use crate::app_state::AppState;
use crate::error::{Fault, Recognized};
use crate::obs::metrics::{HttpMetrics, UNMATCHED_ENDPOINT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success(StatusCode),
    Recognized(StatusCode),
    Fault,
}

impl Outcome {
    fn classify(resp: &Response) -> Self {
        let ext = resp.extensions();
        if ext.get::<Fault>().is_some() {
            Outcome::Fault
        } else if let Some(Recognized(status)) = ext.get::<Recognized>() {
            Outcome::Recognized(*status)
        } else {
            Outcome::Success(resp.status())
        }
    }

    fn status(self) -> StatusCode {
        match self {
            Outcome::Success(s) | Outcome::Recognized(s) => s,
            Outcome::Fault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_error(self) -> bool {
        !matches!(self, Outcome::Success(_))
    }
}

/// Per-request saturation/latency bracket.
struct InFlight {
    metrics: Arc<HttpMetrics>,
    endpoint: String,
    start: Instant,
    completed: bool,
}

impl InFlight {
    fn enter(metrics: Arc<HttpMetrics>, endpoint: String) -> Self {
        metrics.active_requests.inc();
        Self { metrics, endpoint, start: Instant::now(), completed: false }
    }

    /// Record traffic/error counters. Called at most once per request.
    fn complete(&mut self, method: &str, outcome: Outcome) {
        let status = outcome.status();
        let status = status.as_str();
        let labels = [method, self.endpoint.as_str(), status];

        if outcome.is_error() {
            self.metrics.error_count.inc(labels);
        }
        self.metrics.request_count.inc(labels);
        self.completed = true;

        tracing::debug!(
            method,
            endpoint = %self.endpoint,
            status,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "request completed"
        );
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.metrics
            .request_latency
            .observe([self.endpoint.as_str()], self.start.elapsed());
        self.metrics.active_requests.dec();

        if !self.completed {
            tracing::debug!(endpoint = %self.endpoint, "request cancelled before completion");
        }
    }
}

/// HTTP methods kept verbatim as label values; anything else is `OTHER`.
fn method_label(method: &Method) -> &str {
    const STANDARD: [Method; 9] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
        Method::CONNECT,
        Method::PATCH,
        Method::TRACE,
    ];
    if STANDARD.contains(method) {
        method.as_str()
    } else {
        "OTHER"
    }
}

/// Route template the request matched, never the raw path.
fn endpoint_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_owned())
}

/// `axum::middleware::from_fn_with_state` entry point.
pub async fn track_metrics(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let method = method_label(req.method()).to_owned();
    let endpoint = endpoint_label(&req);
    let mut in_flight = InFlight::enter(app.metrics(), endpoint);

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(resp) => {
            let outcome = Outcome::classify(&resp);
            if outcome == Outcome::Fault {
                tracing::warn!(endpoint = %in_flight.endpoint, "handler fault recorded as 500");
            }
            in_flight.complete(&method, outcome);
            resp
        }
        Err(panic) => {
            tracing::error!(endpoint = %in_flight.endpoint, "handler panicked; recorded as 500");
            in_flight.complete(&method, Outcome::Fault);
            drop(in_flight);
            std::panic::resume_unwind(panic)
        }
    }
}
