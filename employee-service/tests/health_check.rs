mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{failing_router, in_memory_router, send};
use service_core::middleware::REQUEST_ID_HEADER;
use tower::util::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    let (status, body) = send(&in_memory_router(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "employee-service");
}

#[tokio::test]
async fn health_check_reports_unreachable_store() {
    let (status, body) = send(&failing_router(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn readiness_follows_store() {
    let (ok, _) = send(&in_memory_router(), Method::GET, "/ready", None).await;
    let (down, body) = send(&failing_router(), Method::GET, "/ready", None).await;

    assert_eq!(ok, StatusCode::OK);
    assert_eq!(down, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service unavailable");
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let response = in_memory_router()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let response = in_memory_router()
        .oneshot(
            Request::builder()
                .uri("/employee")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}
