use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::metrics::{HttpMetrics, UNMATCHED_ROUTE};

/// Times every request and records it once the handler chain has produced
/// its final response.
///
/// The route label is the declared pattern (`/trip/:id`), taken from
/// `MatchedPath`, so raw ids never become label values. If the request
/// future is dropped before the response exists the timer is dropped with
/// it and nothing is recorded.
pub async fn track_metrics(
    State(metrics): State<Arc<HttpMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());
    let timer = metrics.begin(req.method().as_str(), route);

    let response = next.run(req).await;

    metrics.complete(timer, response.status().as_u16());
    response
}
