//! Relay endpoint tests.
//!
//! Drives the router with `oneshot` requests against a recording provider
//! and covers the whole response contract: 200, 405, and both 500s.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{body::Body, http::StatusCode, Router};
use http::Request;
use relay_api::{config::DEFAULT_MAX_BODY_BYTES, create_router, server::LEGACY_RELAY_PATH, AppState};
use relay_core::settings::{API_KEY_VAR, RECIPIENT_VAR, SENDER_VAR};
use relay_mail::MailError;
use relay_testing::{
    settings::TEST_API_KEY, LogCapture, RecordingProvider, StaticSettings, TestClock,
};
use tower::ServiceExt;

fn app(provider: &RecordingProvider, settings: StaticSettings) -> Router {
    let state = AppState::new(Arc::new(provider.clone()))
        .with_settings(Arc::new(settings))
        .with_clock(Arc::new(TestClock::new()));
    create_router(state, DEFAULT_MAX_BODY_BYTES)
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/send-visit")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

#[tokio::test]
async fn click_event_is_relayed() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());

    let response =
        app.oneshot(post(r#"{"eventType":"click","path":"/pricing"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    let sent = provider.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].api_key, TEST_API_KEY);
    assert_eq!(sent[0].message.to, "owner@example.com");
    assert_eq!(sent[0].message.from, "relay@example.com");
    assert!(sent[0].message.subject.contains("click"));
    assert!(sent[0].message.subject.contains("/pricing"));
}

#[tokio::test]
async fn non_post_methods_are_rejected_without_sending() {
    for method in ["GET", "PUT", "DELETE", "PATCH", "OPTIONS"] {
        let provider = RecordingProvider::accepting();
        let app = app(&provider, StaticSettings::valid());

        let request =
            Request::builder().method(method).uri("/send-visit").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(body_text(response).await, "Method Not Allowed");
        provider.assert_call_count(0).await;
    }
}

#[tokio::test]
async fn method_is_checked_before_settings() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::empty());

    let request = Request::builder().method("GET").uri("/send-visit").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn missing_settings_are_a_server_error() {
    for var in [API_KEY_VAR, RECIPIENT_VAR, SENDER_VAR] {
        let provider = RecordingProvider::accepting();
        let app = app(&provider, StaticSettings::valid().without(var));

        let response = app.oneshot(post(r#"{"eventType":"click"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "without {var}");
        assert_eq!(body_text(response).await, "Server misconfigured");
        provider.assert_call_count(0).await;
    }
}

#[tokio::test]
async fn empty_settings_count_as_missing() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid().with(RECIPIENT_VAR, ""));

    let response = app.oneshot(post("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Server misconfigured");
    provider.assert_call_count(0).await;
}

#[tokio::test]
async fn provider_failure_is_a_generic_server_error() {
    let provider = RecordingProvider::failing(MailError::rejected(401, "The provided authorization grant is invalid"));
    let app = app(&provider, StaticSettings::valid());

    let response = app.oneshot(post(r#"{"eventType":"click"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert_eq!(body, "Failed to send email");
    assert!(!body.contains("authorization"));
    provider.assert_call_count(1).await;
}

#[tokio::test]
async fn non_json_body_is_relayed_raw() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());

    let response = app.oneshot(post("hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = provider.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message.subject, "Website event: visit");
    assert!(sent[0].message.html.contains("&quot;raw&quot;: &quot;hello&quot;"));
}

#[tokio::test]
async fn non_json_body_with_failing_provider_is_500_not_400() {
    let provider = RecordingProvider::failing(MailError::network("connection refused"));
    let app = app(&provider, StaticSettings::valid());

    let response = app.oneshot(post("hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Failed to send email");
}

#[tokio::test]
async fn empty_body_uses_defaults_and_clock() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());

    let response = app.oneshot(post(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = provider.sent().await;
    assert_eq!(
        sent[0].message.text,
        "Event: visit\nPath: unknown\nReferrer: none\nTime: 3/5/2024, 9:07:03 AM"
    );
}

#[tokio::test]
async fn report_timestamp_is_rendered() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());

    let response = app
        .oneshot(post(r#"{"eventType":"visit","path":"/","referrer":"https://search.example","ts":1700000000000}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = provider.sent().await;
    assert_eq!(
        sent[0].message.text,
        "Event: visit\nPath: /\nReferrer: https://search.example\nTime: 11/14/2023, 10:13:20 PM"
    );
}

#[tokio::test]
async fn repeated_requests_send_independently() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());
    let body = r#"{"eventType":"click","path":"/pricing"}"#;

    let first = app.clone().oneshot(post(body)).await.unwrap();
    let second = app.oneshot(post(body)).await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    let sent = provider.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].message, sent[1].message);
}

#[tokio::test]
async fn legacy_function_path_is_served() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());

    let request = Request::builder()
        .method("POST")
        .uri(LEGACY_RELAY_PATH)
        .body(Body::from(r#"{"eventType":"scroll"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    provider.assert_call_count(1).await;
}

#[tokio::test]
async fn responses_carry_request_id() {
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());

    let response = app.oneshot(post("{}")).await.unwrap();

    let request_id = response.headers().get("x-request-id").expect("request id header");
    assert!(uuid_like(request_id.to_str().unwrap()));
}

#[tokio::test]
async fn oversized_body_is_refused_before_sending() {
    let provider = RecordingProvider::accepting();
    let state = AppState::new(Arc::new(provider.clone()))
        .with_settings(Arc::new(StaticSettings::valid()))
        .with_clock(Arc::new(TestClock::new()));
    let app = create_router(state, 16);

    let response = app.oneshot(post("x".repeat(64))).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    provider.assert_call_count(0).await;
}

#[tokio::test]
async fn oversized_non_post_body_is_still_method_not_allowed() {
    let provider = RecordingProvider::accepting();
    let state = AppState::new(Arc::new(provider.clone()))
        .with_settings(Arc::new(StaticSettings::valid()))
        .with_clock(Arc::new(TestClock::new()));
    let app = create_router(state, 16);

    let request =
        Request::builder().method("PUT").uri("/send-visit").body(Body::from("x".repeat(64))).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, "Method Not Allowed");
    provider.assert_call_count(0).await;
}

#[tokio::test]
async fn delivery_failure_logs_provider_detail() {
    let (logs, _guard) = LogCapture::install();
    let provider = RecordingProvider::failing(MailError::rejected(
        403,
        "The from address does not match a verified Sender Identity.",
    ));
    let app = app(&provider, StaticSettings::valid());

    let response = app.oneshot(post(r#"{"eventType":"click"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(logs.contains("Email provider call failed"), "logs: {}", logs.contents());
    assert!(logs.contains("HTTP 403: The from address does not match a verified Sender Identity."));
    assert!(!logs.contains(TEST_API_KEY));
}

#[tokio::test]
async fn misconfiguration_logs_variable_names_only() {
    let (logs, _guard) = LogCapture::install();
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid().without(RECIPIENT_VAR).with(SENDER_VAR, ""));

    let response = app.oneshot(post("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let contents = logs.contents();
    assert!(contents.contains("missing mail settings: RECIPIENT_EMAIL, SENDER_EMAIL"), "logs: {contents}");
    assert!(!contents.contains(API_KEY_VAR));
    assert!(!contents.contains(TEST_API_KEY));
}

#[tokio::test]
async fn successful_relay_never_logs_api_key() {
    let (logs, _guard) = LogCapture::install();
    let provider = RecordingProvider::accepting();
    let app = app(&provider, StaticSettings::valid());

    let response = app.oneshot(post(r#"{"eventType":"click","path":"/pricing"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(logs.contains("Notification email sent"));
    assert!(!logs.contains(TEST_API_KEY));
}

fn uuid_like(value: &str) -> bool {
    value.len() == 36 && value.chars().filter(|c| *c == '-').count() == 4
}
