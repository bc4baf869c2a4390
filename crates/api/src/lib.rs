//! Shopfront API library.
//!
//! JSON API for the product catalog and newsletter, backed by a document
//! store. The router is built here so integration tests can drive it against
//! the in-memory store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// `cors_origins` restricts cross-origin access to the listed origins; an
/// empty list allows any origin. Sentry layers are added by the binary.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    routes::routes()
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::request_span))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
