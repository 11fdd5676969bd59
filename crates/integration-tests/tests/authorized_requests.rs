//! Bearer handling, error mapping and unauthorized handling.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::multipart::Form;
use ridextra_admin::{AdminError, ApiRequest, SessionState};
use ridextra_core::UserId;
use ridextra_integration_tests::{TEST_TOKEN, TestBackend, ok};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, Request, ResponseTemplate};

fn no_authorization(request: &Request) -> bool {
    !request.headers.contains_key("authorization")
}

// =============================================================================
// Unauthorized handling
// =============================================================================

#[tokio::test]
async fn test_anonymous_request_rejected() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/get-all-user"))
        .and(no_authorization)
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&backend.server)
        .await;

    let err = backend.client.get("/admin/get-all-user").await.unwrap_err();

    assert!(matches!(
        err,
        AdminError::Unauthorized {
            status: StatusCode::UNAUTHORIZED
        }
    ));
    assert_eq!(backend.store.state().await, SessionState::Anonymous);
    assert_eq!(backend.unauthorized_count(), 1);
}

#[tokio::test]
async fn test_forbidden_ends_session() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/admin/profile"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})))
        .mount(&backend.server)
        .await;

    let err = backend.client.get("/admin/profile").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(err.is_unauthorized());
    assert!(backend.store.current().await.is_none());
    assert_eq!(backend.unauthorized_count(), 1);
}

#[tokio::test]
async fn test_concurrent_rejections_fire_hook_once() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(200)))
        .expect(3)
        .mount(&backend.server)
        .await;

    let client = &backend.client;
    let (a, b, c) = tokio::join!(
        client.get("/admin/get-all-user"),
        client.get("/admin/get-all-driver"),
        client.get("/admin/get-all-ride"),
    );

    assert!(a.unwrap_err().is_unauthorized());
    assert!(b.unwrap_err().is_unauthorized());
    assert!(c.unwrap_err().is_unauthorized());
    assert_eq!(backend.store.state().await, SessionState::Anonymous);
    assert_eq!(backend.unauthorized_count(), 1);
}

// =============================================================================
// Success and failure envelopes
// =============================================================================

#[tokio::test]
async fn test_mutation_with_bearer_token() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("POST"))
        .and(path("/admin/change-user-status"))
        .and(header("authorization", "Bearer tok123"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"id": "u1", "block": true})))
        .respond_with(ok(json!({
            "statusCode": 200, "status": true, "message": "User blocked"
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let envelope = backend
        .client
        .users()
        .set_blocked(&UserId::new("u1"), true)
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 200);
    assert!(envelope.status);
    assert_eq!(envelope.message(), Some("User blocked"));
}

#[tokio::test]
async fn test_server_error_carries_backend_message() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/admin/get-all-driver"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Internal error"})),
        )
        .mount(&backend.server)
        .await;

    let err = backend.client.get("/admin/get-all-driver").await.unwrap_err();

    match err {
        AdminError::Request { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "Internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.store.state().await, SessionState::Authenticated);
    assert_eq!(backend.unauthorized_count(), 0);
}

#[tokio::test]
async fn test_error_without_body_uses_fallback() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/admin/get-all-ticket"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&backend.server)
        .await;

    let err = backend.client.get("/admin/get-all-ticket").await.unwrap_err();

    assert!(matches!(
        err,
        AdminError::Request { status: StatusCode::BAD_GATEWAY, ref message } if message == "Request failed"
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_data_is_passed_through() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard"))
        .respond_with(ok(json!({
            "status": true,
            "data": {"riders": 12, "drivers": {"online": 3}}
        })))
        .mount(&backend.server)
        .await;

    let data: Value = backend
        .client
        .request_data(ApiRequest::get("/admin/dashboard"))
        .await
        .unwrap();

    assert_eq!(data, json!({"riders": 12, "drivers": {"online": 3}}));
}

#[tokio::test]
async fn test_missing_data_is_a_decode_error() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard"))
        .respond_with(ok(json!({"status": true})))
        .mount(&backend.server)
        .await;

    let err = backend
        .client
        .request_data::<Value>(ApiRequest::get("/admin/dashboard"))
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::Decode(_)));
}

// =============================================================================
// Request bodies
// =============================================================================

#[tokio::test]
async fn test_multipart_keeps_its_own_content_type() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("POST"))
        .and(path("/admin/upload-document"))
        .and(header("authorization", "Bearer tok123"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ok(json!({"status": true, "message": "Uploaded"})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let form = Form::new().text("driverId", "d1");
    let envelope = backend
        .client
        .authorized_request(ApiRequest::post("/admin/upload-document").multipart(form))
        .await
        .unwrap();

    assert_eq!(envelope.message(), Some("Uploaded"));
}

#[tokio::test]
async fn test_bodyless_request_declares_json() {
    let backend = TestBackend::start().await;
    backend.seed_session(TEST_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/admin/profile"))
        .and(header("content-type", "application/json"))
        .respond_with(ok(json!({"status": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend.client.get("/admin/profile").await.unwrap();
}
