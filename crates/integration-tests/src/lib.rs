//! Integration tests for the Shopfront API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! The full router (middleware included) is driven in-process with
//! `tower::ServiceExt::oneshot` against the in-memory document store, so no
//! MongoDB server is needed.
//!
//! # Test Categories
//!
//! - `health` - Health and readiness probes, fallback, request IDs
//! - `products` - Catalog listing, detail, creation and categories
//! - `newsletter` - Subscribe, unsubscribe and subscriber listing

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use shopfront_api::db::{DocumentStore, MemoryStore, ensure_indexes};
use shopfront_api::state::AppState;

/// An in-process API instance with direct access to its store.
pub struct TestApp {
    router: Router,
    /// Backing store, for arranging fixtures and asserting on documents.
    pub store: Arc<MemoryStore>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, or `Value::Null` for empty or non-JSON bodies.
    pub body: Value,
}

impl TestApp {
    /// Build an app over a fresh, indexed in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if index creation fails.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        ensure_indexes(store.as_ref())
            .await
            .expect("in-memory indexes");
        let router = Self::router_for(store.clone());
        Self { router, store }
    }

    /// Build a bare router over any store.
    #[must_use]
    pub fn router_for(store: Arc<dyn DocumentStore>) -> Router {
        shopfront_api::app(AppState::new(store), &[])
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    /// Send a POST request with a raw body labelled as JSON.
    pub async fn post_raw(&self, uri: &str, body: impl Into<String>) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Body::from(body.into()),
            Some("application/json"),
        )
        .await
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        send(self.router.clone(), method, uri, body, content_type).await
    }
}

/// Send a request through a router and buffer the response.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }
    let request = request.body(body).expect("valid request");

    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}
