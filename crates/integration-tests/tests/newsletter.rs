//! Integration tests for newsletter subscription endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use shopfront_api::db::SUBSCRIBERS;
use shopfront_core::Email;
use shopfront_integration_tests::TestApp;

#[tokio::test]
async fn test_subscribe_creates_subscriber() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/subscribe", &json!({ "email": "Reader@Example.com" }))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Successfully subscribed to newsletter!");
    assert!(response.body["subscriber_id"].is_string());

    let listing = app.get("/api/subscribers").await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["count"], 1);
    let normalized = Email::parse("Reader@Example.com").unwrap();
    assert_eq!(listing.body["subscribers"][0]["email"], normalized.as_str());
    assert_eq!(listing.body["subscribers"][0]["is_active"], true);
    assert_eq!(
        listing.body["subscribers"][0]["_id"],
        response.body["subscriber_id"]
    );
}

#[tokio::test]
async fn test_subscribe_twice_is_idempotent() {
    let app = TestApp::spawn().await;
    app.post_json("/api/subscribe", &json!({ "email": "a@b.com" }))
        .await;

    let response = app
        .post_json("/api/subscribe", &json!({ "email": "A@B.COM" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Email already subscribed");
    assert_eq!(app.store.len(SUBSCRIBERS), 1);
}

#[tokio::test]
async fn test_unsubscribe_then_resubscribe_reactivates() {
    let app = TestApp::spawn().await;
    app.post_json("/api/subscribe", &json!({ "email": "reader@example.com" }))
        .await;

    let response = app
        .post_json("/api/unsubscribe", &json!({ "email": "READER@example.com" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Successfully unsubscribed");
    assert_eq!(app.get("/api/subscribers").await.body["count"], 0);

    let response = app
        .post_json("/api/subscribe", &json!({ "email": "reader@example.com" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Subscription reactivated!");
    assert_eq!(app.get("/api/subscribers").await.body["count"], 1);
    assert_eq!(app.store.len(SUBSCRIBERS), 1);
}

#[tokio::test]
async fn test_unsubscribe_twice_succeeds() {
    let app = TestApp::spawn().await;
    app.post_json("/api/subscribe", &json!({ "email": "reader@example.com" }))
        .await;

    for _ in 0..2 {
        let response = app
            .post_json("/api/unsubscribe", &json!({ "email": "reader@example.com" }))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_unsubscribe_unknown_email_is_404() {
    let app = TestApp::spawn().await;
    app.post_json("/api/subscribe", &json!({ "email": "known@example.com" }))
        .await;

    for email in ["stranger@example.com", "not-an-email"] {
        let response = app
            .post_json("/api/unsubscribe", &json!({ "email": email }))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{email}");
        assert_eq!(response.body["error"], "Email not found");
    }

    assert_eq!(app.store.len(SUBSCRIBERS), 1);
    assert_eq!(app.get("/api/subscribers").await.body["count"], 1);
}

#[tokio::test]
async fn test_email_is_required() {
    let app = TestApp::spawn().await;

    for uri in ["/api/subscribe", "/api/unsubscribe"] {
        for body in [json!({}), json!({ "email": null }), json!({ "email": "  " })] {
            let response = app.post_json(uri, &body).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri} {body}");
            assert_eq!(response.body["error"], "Email is required");
        }
    }
}

#[tokio::test]
async fn test_subscribe_rejects_invalid_email() {
    let app = TestApp::spawn().await;

    for email in [json!("no-at-symbol"), json!("user@domain"), json!("user@domain.c"), json!(7)] {
        let response = app
            .post_json("/api/subscribe", &json!({ "email": email }))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{email}");
        assert_eq!(response.body["error"], "Invalid email format");
    }

    assert!(app.store.is_empty(SUBSCRIBERS));
}

#[tokio::test]
async fn test_subscribe_rejects_unreadable_body() {
    let app = TestApp::spawn().await;

    let response = app.post_raw("/api/subscribe", "email=a@b.com").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_concurrent_subscribes_keep_one_document() {
    let app = TestApp::spawn().await;
    let body = json!({ "email": "racer@example.com" });

    let (first, second, third) = tokio::join!(
        app.post_json("/api/subscribe", &body),
        app.post_json("/api/subscribe", &body),
        app.post_json("/api/subscribe", &body),
    );

    let created = [&first, &second, &third]
        .iter()
        .filter(|r| r.status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);
    assert_eq!(app.store.len(SUBSCRIBERS), 1);
}
