use axum::{
    middleware as axum_mw,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::metrics::{exposition, HttpMetrics};
use crate::middleware::{logging, metrics as metrics_mw};
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    let metrics = state.metrics.clone();

    let routes = Router::new()
        // ── Trip endpoints ──────────────────────────────────────
        .route(
            "/trip",
            get(handlers::trips::list_trips).post(handlers::trips::create_trip),
        )
        .route("/trip/:id", get(handlers::trips::get_trip))
        .route("/hello", get(handlers::hello))
        // ── Metrics ─────────────────────────────────────────────
        .route("/metrics", get(exposition::get_metrics))
        // ── Provide shared state to all routes above ────────────
        .with_state(state);

    instrument(routes, metrics)
}

/// Wraps a router with the request middleware stack.
///
/// Layers apply bottom-up: CORS is outermost, then request logging, then
/// metrics closest to the handlers, where `MatchedPath` is already set.
pub fn instrument(router: Router, metrics: Arc<HttpMetrics>) -> Router {
    router
        .layer(axum_mw::from_fn_with_state(metrics, metrics_mw::track_metrics))
        .layer(axum_mw::from_fn(logging::log_request))
        .layer(CorsLayer::permissive())
}
