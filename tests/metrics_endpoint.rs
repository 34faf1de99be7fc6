use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;

use trip_service::{create_router, server, AppState, HttpMetrics, MemoryTripStore};

fn app() -> (Router, Arc<HttpMetrics>) {
    let metrics = Arc::new(HttpMetrics::new().unwrap());
    let state = Arc::new(AppState::new(
        Arc::new(MemoryTripStore::new()),
        metrics.clone(),
    ));
    (create_router(state), metrics)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn fresh_process_exposes_both_instruments() {
    let (router, _) = app();

    let response = router.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; version=0.0.4"
    );
    let body = body_text(response).await;
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_request_count"));
}

#[tokio::test]
async fn each_request_is_counted_once_under_its_route_pattern() {
    let (router, metrics) = app();

    let response = router
        .clone()
        .oneshot(get_request("/trip/trp_nothere"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(metrics.request_count("GET", "/trip/:id", 404), 1);
    assert_eq!(metrics.observation_count("GET", "/trip/:id", 404), 1);
    assert_eq!(metrics.total_requests(), 1);

    let body = body_text(router.oneshot(get_request("/metrics")).await.unwrap()).await;
    assert!(body.contains(r#"http_request_count{method="GET",route="/trip/:id",status="404"} 1"#));
    assert!(!body.contains("trp_nothere"));
}

#[tokio::test]
async fn scrapes_are_observed_too() {
    let (router, metrics) = app();

    router.clone().oneshot(get_request("/metrics")).await.unwrap();
    router.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(metrics.request_count("GET", "/metrics", 200), 2);
}

#[tokio::test]
async fn concurrent_requests_sum_to_request_total() {
    let (router, metrics) = app();

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let router = router.clone();
            let uri = match i % 3 {
                0 => "/hello".to_string(),
                1 => "/trip".to_string(),
                _ => format!("/trip/trp_{i:08}"),
            };
            tokio::spawn(async move { router.oneshot(get_request(&uri)).await.unwrap() })
        })
        .collect();
    for h in handles {
        h.await.unwrap();
    }

    assert_eq!(metrics.total_requests(), 100);
    assert_eq!(metrics.request_count("GET", "/hello", 200), 34);
    assert_eq!(metrics.request_count("GET", "/trip", 200), 33);
    assert_eq!(metrics.request_count("GET", "/trip/:id", 404), 33);
}

#[tokio::test]
async fn aborted_request_is_not_recorded() {
    let metrics = Arc::new(HttpMetrics::new().unwrap());
    let router = server::instrument(
        Router::new().route("/stall", get(|| std::future::pending::<&'static str>())),
        metrics.clone(),
    );

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        router.oneshot(get_request("/stall")),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(metrics.total_requests(), 0);
    assert_eq!(metrics.observation_count("GET", "/stall", 200), 0);
}

async fn overwritten_status() -> Response {
    let mut response = (StatusCode::NOT_FOUND, "not yet").into_response();
    *response.status_mut() = StatusCode::OK;
    response
}

#[tokio::test]
async fn label_uses_final_status() {
    let metrics = Arc::new(HttpMetrics::new().unwrap());
    let router = server::instrument(
        Router::new().route("/flip", get(overwritten_status)),
        metrics.clone(),
    );

    let response = router.oneshot(get_request("/flip")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(metrics.request_count("GET", "/flip", 200), 1);
    assert_eq!(metrics.request_count("GET", "/flip", 404), 0);
}

#[tokio::test]
async fn unmatched_paths_do_not_become_labels() {
    let (router, metrics) = app();

    let response = router
        .clone()
        .oneshot(get_request("/no/such/page-123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(metrics.total_requests(), 1);

    let body = body_text(router.oneshot(get_request("/metrics")).await.unwrap()).await;
    assert!(!body.contains("page-123"));
}

#[tokio::test]
async fn extension_methods_do_not_grow_series() {
    let (router, metrics) = app();

    for i in 0..50 {
        let request = Request::builder()
            .method(format!("X{i}").as_str())
            .uri("/anything")
            .body(Body::empty())
            .unwrap();
        router.clone().oneshot(request).await.unwrap();
    }

    assert_eq!(metrics.total_requests(), 50);
    assert_eq!(metrics.request_count("other", "unmatched", 404), 50);

    let text = metrics.render().unwrap();
    let series = text
        .lines()
        .filter(|line| line.starts_with("http_request_count{"))
        .count();
    assert_eq!(series, 1);
    assert!(!text.contains(r#"method="X0""#));
}
