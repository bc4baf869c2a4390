//! Integration tests for health probes, routing fallback and request IDs.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Method, http::StatusCode};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};

use shopfront_api::db::{DocumentStore, IndexSpec, StoreError, UpdateOutcome};
use shopfront_integration_tests::{TestApp, send};

/// Store whose every operation fails, as if MongoDB were unreachable.
struct DownStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl DocumentStore for DownStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        Err(down())
    }

    async fn find(&self, _: &str, _: Document) -> Result<Vec<Document>, StoreError> {
        Err(down())
    }

    async fn find_one(&self, _: &str, _: Document) -> Result<Option<Document>, StoreError> {
        Err(down())
    }

    async fn insert_one(&self, _: &str, _: Document) -> Result<ObjectId, StoreError> {
        Err(down())
    }

    async fn update_one(
        &self,
        _: &str,
        _: Document,
        _: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(down())
    }

    async fn distinct(&self, _: &str, _: &str) -> Result<Vec<Bson>, StoreError> {
        Err(down())
    }

    async fn delete_many(&self, _: &str, _: Document) -> Result<u64, StoreError> {
        Err(down())
    }

    async fn create_index(&self, _: &IndexSpec) -> Result<(), StoreError> {
        Err(down())
    }
}

async fn get_down(uri: &str) -> shopfront_integration_tests::TestResponse {
    let router = TestApp::router_for(Arc::new(DownStore));
    send(router, Method::GET, uri, Body::empty(), None).await
}

#[tokio::test]
async fn test_health_reports_connected_store() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["version"], "1.0.0");
    assert!(response.body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_health_reports_disconnected_store_without_failing() {
    let response = get_down("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"], "disconnected");
    assert!(!response.body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/api/health/ready").await.status, StatusCode::OK);

    let response = get_down("/api/health/ready").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_store_failure_is_an_opaque_server_error() {
    for uri in ["/api/products", "/api/categories", "/api/subscribers"] {
        let response = get_down(uri).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(
            response.body,
            serde_json::json!({ "error": "Internal server error" }),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_unknown_endpoint_is_json_404() {
    let app = TestApp::spawn().await;

    for uri in ["/api/nope", "/products", "/"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.body["error"], "Endpoint not found", "{uri}");
    }
}

#[tokio::test]
async fn test_every_response_carries_a_request_id() {
    let app = TestApp::spawn().await;

    let ok = app.get("/api/health").await;
    let missing = app.get("/api/missing").await;

    assert!(ok.headers.contains_key("x-request-id"));
    assert!(missing.headers.contains_key("x-request-id"));
    assert_ne!(ok.headers["x-request-id"], missing.headers["x-request-id"]);
}
