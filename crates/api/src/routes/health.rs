//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Version reported by the health endpoint.
pub const API_VERSION: &str = "1.0.0";

/// Health report body.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub database: &'static str,
    pub version: &'static str,
}

/// Health endpoint.
///
/// Always 200 while the process is serving; store connectivity is reported
/// inline so dashboards can tell a degraded service from a dead one.
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let database = match state.store().ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the store");
            "disconnected"
        }
    };

    Json(HealthReport {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database,
        version: API_VERSION,
    })
}

/// Readiness probe.
///
/// Returns 503 Service Unavailable if the store is not reachable.
#[instrument(skip(state))]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
