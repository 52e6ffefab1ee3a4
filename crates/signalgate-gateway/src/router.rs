//! Axum router wiring.
//!
//! Routes are registered first, then wrapped by the metrics middleware as a
//! single layer, so no handler needs to know about instrumentation.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, obs, ops, routes};

pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(ops::status))
        .route("/400", get(routes::bad_request))
        .route("/500", get(routes::server_error))
        .route("/success", get(routes::success))
        .fallback(routes::not_found);

    let app = if state.cfg().metrics.instrument_exposition {
        instrument(app.route("/metrics", get(ops::metrics)), &state)
    } else {
        // Routes added after the layer bypass it.
        instrument(app, &state).route("/metrics", get(ops::metrics))
    };

    app.with_state(state)
}

/// Wrap every route (and the fallback) of `router` with the metrics middleware.
pub fn instrument(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state.clone(), obs::track_metrics))
}
