//! In-memory mail provider.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::EmailMessage;
use relay_mail::{MailError, MailProvider, Result};
use tokio::sync::RwLock;

/// A message captured by [`RecordingProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// API key the relay passed along
    pub api_key: String,
    /// The rendered message
    pub message: EmailMessage,
}

/// Provider that records every call and answers with a canned result.
#[derive(Debug, Clone)]
pub struct RecordingProvider {
    sent: Arc<RwLock<Vec<SentMail>>>,
    failure: Option<MailError>,
}

impl RecordingProvider {
    /// Creates a provider that accepts every message.
    pub fn accepting() -> Self {
        Self { sent: Arc::new(RwLock::new(Vec::new())), failure: None }
    }

    /// Creates a provider that records, then fails every call with `error`.
    pub fn failing(error: MailError) -> Self {
        Self { sent: Arc::new(RwLock::new(Vec::new())), failure: Some(error) }
    }

    /// Returns every call received so far.
    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.read().await.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.sent.read().await.len()
    }

    /// Asserts that exactly `expected` calls were received.
    pub async fn assert_call_count(&self, expected: usize) {
        let actual = self.call_count().await;
        assert_eq!(actual, expected, "Expected {expected} provider calls, received {actual}");
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::accepting()
    }
}

#[async_trait]
impl MailProvider for RecordingProvider {
    async fn send(&self, api_key: &str, message: &EmailMessage) -> Result<()> {
        self.sent
            .write()
            .await
            .push(SentMail { api_key: api_key.to_string(), message: message.clone() });

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
