//! Common test utilities and helpers for devworkspace-api tests
//!
//! Builds routers over either the recording client (to observe exactly what
//! the gateway forwards) or the in-memory client (for end-to-end flows).

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use devworkspace_api::{create_app, Config};
use devworkspace_client::test_utils::RecordingClientFactory;
use devworkspace_client::InMemoryClientFactory;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

pub const ROUTING_CLASS: &str = "che";
pub const TOKEN: &str = "test-token";

pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        base_api_path: "/api".to_string(),
        routing_class: ROUTING_CLASS.to_string(),
    }
}

/// App backed by a recording client the test can inspect.
pub fn recording_app() -> (Router, RecordingClientFactory) {
    let factory = RecordingClientFactory::new();
    let app = create_app(&test_config(), Arc::new(factory.clone()))
        .expect("Failed to create test app");
    (app, factory)
}

/// App backed by a fresh in-memory client.
pub fn in_memory_app() -> Router {
    create_app(&test_config(), Arc::new(InMemoryClientFactory::new()))
        .expect("Failed to create test app")
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(
            serde_json::to_string(body).expect("Failed to serialize request body"),
        ))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    // Router is cheap to clone
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

/// Helper to extract JSON body from axum response
pub async fn extract_json_body<T>(response: Response<Body>) -> T
where
    T: serde::de::DeserializeOwned,
{
    let body = body_bytes(response).await;
    serde_json::from_slice(&body).expect("Failed to deserialize JSON")
}
