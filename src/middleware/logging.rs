use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

/// Request logging middleware.
///
/// Emits one structured event per request (`HTTP {method} {uri}`) with the
/// final status and latency, and adds a `Server-Timing` header carrying
/// the same latency. 5xx log at error, 4xx at warn.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let start = Instant::now();
    let mut response = next.run(req).await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    let server_timing = format!("total;dur={latency_ms:.3}");
    if let Ok(val) = server_timing.parse() {
        response.headers_mut().insert("Server-Timing", val);
    }

    let status = response.status().as_u16();
    match status {
        500..=599 => error!(%method, %uri, status, latency_ms, "HTTP {method} {uri}"),
        400..=499 => warn!(%method, %uri, status, latency_ms, "HTTP {method} {uri}"),
        _ => info!(%method, %uri, status, latency_ms, "HTTP {method} {uri}"),
    }

    response
}
