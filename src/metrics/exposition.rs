use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::AppState;

// ─── GET /metrics ────────────────────────────────────────────────
/// Prometheus scrape endpoint. Renders the whole registry on every call.

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => {
            debug!(bytes = body.len(), "rendered metrics snapshot");
            (
                [(header::CONTENT_TYPE, state.metrics.content_type())],
                body,
            )
                .into_response()
        }
        Err(err) => {
            error!(%err, "failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
