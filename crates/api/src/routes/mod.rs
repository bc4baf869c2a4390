//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health             - Health report (store connectivity inline)
//! GET  /api/health/ready       - Readiness probe (503 if the store is down)
//!
//! # Products
//! GET  /api/products           - Product listing (?category=&featured=)
//! POST /api/products           - Create a product
//! GET  /api/products/{id}      - Product detail
//! GET  /api/categories         - Distinct category labels
//!
//! # Newsletter
//! POST /api/subscribe          - Subscribe or reactivate an email
//! POST /api/unsubscribe        - Deactivate an email
//! GET  /api/subscribers        - Active subscribers
//! ```
//!
//! Anything else answers 404 with `{"error": "Endpoint not found"}`.

pub mod health;
pub mod newsletter;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the `/api` router with the not-found fallback.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .fallback(not_found)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(products::categories))
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
        .route("/subscribers", get(newsletter::subscribers))
}

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}
