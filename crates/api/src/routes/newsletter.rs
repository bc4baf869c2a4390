//! Newsletter subscription route handlers.
//!
//! Emails are normalized (trimmed, lowercased) before any lookup, so
//! `Reader@Example.com` and `reader@example.com` are the same subscriber.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use shopfront_core::Email;

use crate::error::{AppError, Result};
use crate::models::{SubscribeOutcome, Subscriber};
use crate::state::AppState;

/// Subscribe request body.
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: Option<Value>,
}

/// Unsubscribe request body.
#[derive(Debug, Default, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub email: Option<Value>,
}

/// Extract a non-empty email string from a request field.
fn required_email(field: Option<Value>) -> Result<String> {
    match field {
        None | Some(Value::Null) => Err(email_required()),
        Some(Value::String(raw)) if raw.trim().is_empty() => Err(email_required()),
        Some(Value::String(raw)) => Ok(raw),
        Some(_) => Err(AppError::BadRequest("Invalid email format".to_string())),
    }
}

fn email_required() -> AppError {
    AppError::BadRequest("Email is required".to_string())
}

/// Subscribe to the newsletter.
///
/// 201 for a new subscriber, 200 when the email was already active or has
/// been reactivated.
#[instrument(skip(state, payload))]
pub async fn subscribe(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(request) = payload?;
    let raw = required_email(request.email)?;
    let email =
        Email::parse(&raw).map_err(|_| AppError::BadRequest("Invalid email format".to_string()))?;

    let outcome = state.subscribers().subscribe(&email).await?;
    let response = match &outcome {
        SubscribeOutcome::Created(subscriber_id) => {
            tracing::info!(%subscriber_id, "Newsletter subscription successful");
            (
                StatusCode::CREATED,
                Json(json!({
                    "message": "Successfully subscribed to newsletter!",
                    "subscriber_id": subscriber_id,
                })),
            )
        }
        SubscribeOutcome::AlreadySubscribed(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Email already subscribed" })),
        ),
        SubscribeOutcome::Reactivated(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Subscription reactivated!" })),
        ),
    };

    Ok(response)
}

/// Unsubscribe from the newsletter.
///
/// Unknown emails (including ones that could never have subscribed) are 404.
#[instrument(skip(state, payload))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;
    let raw = required_email(request.email)?;
    let Ok(email) = Email::parse(&raw) else {
        return Err(email_not_found());
    };

    if state.subscribers().unsubscribe(&email).await? {
        tracing::info!("Newsletter unsubscribe successful");
        Ok(Json(json!({ "message": "Successfully unsubscribed" })))
    } else {
        Err(email_not_found())
    }
}

fn email_not_found() -> AppError {
    AppError::NotFound("Email not found".to_string())
}

/// Active subscriber listing body.
#[derive(Debug, Serialize)]
pub struct SubscriberList {
    pub subscribers: Vec<Subscriber>,
    pub count: usize,
}

/// List active subscribers.
#[instrument(skip(state))]
pub async fn subscribers(State(state): State<AppState>) -> Result<Json<SubscriberList>> {
    let subscribers = state.subscribers().list_active().await?;

    Ok(Json(SubscriberList {
        count: subscribers.len(),
        subscribers,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::SubscriberId;

    use super::*;

    fn message(error: AppError) -> String {
        error.to_string()
    }

    #[test]
    fn test_required_email_rejects_missing_and_blank() {
        assert_eq!(message(required_email(None).unwrap_err()), "Email is required");
        assert_eq!(
            message(required_email(Some(Value::Null)).unwrap_err()),
            "Email is required"
        );
        assert_eq!(
            message(required_email(Some(json!("   "))).unwrap_err()),
            "Email is required"
        );
    }

    #[test]
    fn test_required_email_rejects_non_strings() {
        assert_eq!(
            message(required_email(Some(json!(42))).unwrap_err()),
            "Invalid email format"
        );
    }

    #[test]
    fn test_required_email_passes_strings_through() {
        assert_eq!(required_email(Some(json!(" a@b.com"))).unwrap(), " a@b.com");
    }

    #[test]
    fn test_subscriber_id_serializes_as_string() {
        let value = json!({ "subscriber_id": SubscriberId::new("abc") });
        assert_eq!(value["subscriber_id"], "abc");
    }
}
