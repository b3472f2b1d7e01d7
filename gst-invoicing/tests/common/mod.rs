#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use gst_invoicing::config::{DatabaseConfig, InvoicingConfig, StorageBackend};
use gst_invoicing::models::TaxMode;
use gst_invoicing::services::{init_metrics, InvoiceStore, MemoryStore};
use gst_invoicing::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::sync::{Arc, Once};
use tower::util::ServiceExt;

static INIT_METRICS: Once = Once::new();

pub fn test_config() -> InvoicingConfig {
    InvoicingConfig {
        common: CoreConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0, // Random port for testing
        },
        service_name: "gst-invoicing".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        storage: StorageBackend::Memory,
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
        },
        tax_mode: TaxMode::RateIsEach,
    }
}

/// Router over a fresh in-memory store.
pub struct TestRouter {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestRouter {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: InvoicingConfig) -> Self {
        INIT_METRICS.call_once(init_metrics);

        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            config,
            store: store.clone() as Arc<dyn InvoiceStore>,
        };

        Self {
            router: build_router(state),
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header_value(response: &Response<Body>, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// A running server on a random port, backed by the in-memory store.
pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        INIT_METRICS.call_once(init_metrics);

        let app = Application::with_store(test_config(), Arc::new(MemoryStore::new()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_with_shutdown(std::future::pending()).await.ok();
        });

        TestApp { address, port }
    }
}
