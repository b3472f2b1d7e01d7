mod common;

use axum::http::{header, StatusCode};
use common::{body_json, body_text, header_value, TestApp, TestRouter};
use reqwest::Client;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gst-invoicing");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestRouter::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!header_value(&response, header::HeaderName::from_static("x-request-id")).is_empty());
    assert_eq!(header_value(&response, header::X_CONTENT_TYPE_OPTIONS), "nosniff");

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_text() {
    let app = TestRouter::new();

    // Generate at least one labelled sample.
    app.get("/health").await;
    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("http_requests_total"));
}
