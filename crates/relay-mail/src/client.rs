//! SendGrid v3 client.
//!
//! Builds the `mail/send` request body from an [`EmailMessage`], sends it
//! with the caller's API key, and turns non-success responses into
//! [`MailError::Rejected`] with the provider's error messages attached.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use relay_core::EmailMessage;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};

use crate::{
    error::{MailError, Result},
    provider::MailProvider,
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECONDS,
};

const SEND_PATH: &str = "/v3/mail/send";

/// Maximum number of characters of a response body kept in error detail.
const MAX_DETAIL_CHARS: usize = 1024;

/// Configuration for the SendGrid client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without the `/v3/...` path.
    pub base_url: String,
    /// Timeout for the whole provider request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: concat!("visit-relay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for the SendGrid mail API.
#[derive(Debug, Clone)]
pub struct SendGridClient {
    client: reqwest::Client,
    endpoint: Url,
    config: ClientConfig,
}

impl SendGridClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Configuration` if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoint = format!("{}{SEND_PATH}", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            MailError::configuration(format!("invalid API URL {}: {e}", config.base_url))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| MailError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint, config })
    }

    /// The full `mail/send` URL this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl MailProvider for SendGridClient {
    async fn send(&self, api_key: &str, message: &EmailMessage) -> Result<()> {
        let span = info_span!("sendgrid_send", subject = %message.subject);

        async move {
            let start = Instant::now();
            tracing::debug!("Sending notification email");

            let response = self
                .client
                .post(self.endpoint.clone())
                .bearer_auth(api_key)
                .json(&SendRequest::from(message))
                .send()
                .await
                .map_err(|e| {
                    tracing::warn!(duration_ms = start.elapsed().as_millis(), "Request failed: {}", e);
                    if e.is_timeout() {
                        MailError::timeout(self.config.timeout)
                    } else if e.is_connect() {
                        MailError::network(format!("connection failed: {e}"))
                    } else {
                        MailError::network(e.to_string())
                    }
                })?;

            let status = response.status();
            tracing::debug!(
                status = status.as_u16(),
                duration_ms = start.elapsed().as_millis(),
                "Received provider response"
            );

            if status.is_success() {
                return Ok(());
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("[Failed to read response body: {e}]"),
            };
            Err(MailError::rejected(status.as_u16(), error_detail(&body)))
        }
        .instrument(span)
        .await
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

impl<'a> From<&'a EmailMessage> for SendRequest<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            personalizations: [Personalization { to: [Address { email: &message.to }] }],
            from: Address { email: &message.from },
            subject: &message.subject,
            // SendGrid requires text/plain before text/html.
            content: [
                Content { kind: "text/plain", value: &message.text },
                Content { kind: "text/html", value: &message.html },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    message: Option<String>,
    field: Option<String>,
}

/// Extracts readable detail from a SendGrid error response.
fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let messages: Vec<String> = parsed
            .errors
            .into_iter()
            .filter_map(|item| match (item.message, item.field) {
                (Some(message), Some(field)) => Some(format!("{message} (field: {field})")),
                (Some(message), None) => Some(message),
                (None, _) => None,
            })
            .collect();
        if !messages.is_empty() {
            return truncate_detail(&messages.join("; "));
        }
    }

    truncate_detail(body)
}

fn truncate_detail(detail: &str) -> String {
    if detail.chars().count() > MAX_DETAIL_CHARS {
        let truncated: String = detail.chars().take(MAX_DETAIL_CHARS).collect();
        format!("{truncated}... (truncated)")
    } else {
        detail.to_string()
    }
}
