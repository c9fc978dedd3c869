//! SendGrid API mock for end-to-end tests.

use std::time::Duration;

use serde_json::Value;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const SEND_PATH: &str = "/v3/mail/send";

/// Wiremock server answering on the SendGrid `mail/send` path.
pub struct MockSendGrid {
    server: MockServer,
}

impl MockSendGrid {
    /// Starts a new mock server on a random port.
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    /// Base URL to configure the client with.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Accepts every message with `202 Accepted`, as SendGrid does.
    pub async fn accept(&self) {
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(ResponseTemplate::new(202))
            .mount(&self.server)
            .await;
    }

    /// Rejects every message with `status` and a SendGrid error body.
    pub async fn reject(&self, status: u16, message: &str) {
        let body = serde_json::json!({
            "errors": [{ "message": message, "field": null, "help": null }]
        });
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answers after `delay`, to exercise client timeouts.
    pub async fn stall(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(ResponseTemplate::new(202).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far.
    pub async fn received_messages(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    /// `Authorization` headers of every request received so far.
    pub async fn received_authorizations(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| {
                request.headers.get("authorization").and_then(|v| v.to_str().ok()).map(String::from)
            })
            .collect()
    }

    /// Asserts that exactly `expected` requests were received.
    pub async fn assert_request_count(&self, expected: usize) {
        let actual = self.server.received_requests().await.unwrap_or_default().len();
        assert_eq!(actual, expected, "Expected {expected} SendGrid requests, received {actual}");
    }
}
