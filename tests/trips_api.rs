use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use trip_service::{create_router, AppState, HttpMetrics, MemoryTripStore};

fn router() -> Router {
    let state = Arc::new(AppState::new(
        Arc::new(MemoryTripStore::new()),
        Arc::new(HttpMetrics::new().unwrap()),
    ));
    create_router(state)
}

fn create_request(body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/trip")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> JsonValue {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn create_then_fetch_by_id() {
    let router = router();

    let response = router
        .clone()
        .oneshot(create_request(json!({
            "tripName": "Monsoon in Kerala",
            "tripType": "leisure",
            "totalCost": 38000,
            "featured": true
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["_id"].as_str().unwrap().to_string();
    assert!(id.starts_with("trp_"));
    assert_eq!(created["tripName"], "Monsoon in Kerala");

    let response = router
        .oneshot(get_request(&format!("/trip/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_returns_trips_in_insertion_order() {
    let router = router();

    for name in ["Hampi", "Porto", "Cusco"] {
        let response = router
            .clone()
            .oneshot(create_request(json!({ "tripName": name })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router.oneshot(get_request("/trip")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let trips = body_json(response).await;
    let names: Vec<&str> = trips
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["tripName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Hampi", "Porto", "Cusco"]);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let response = router()
        .oneshot(get_request("/trip/trp_deadbeef"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "trip 'trp_deadbeef' not found");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/trip")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn hello_world() {
    let response = router().oneshot(get_request("/hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("server-timing"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Hello World!");
}
