//! Provider abstraction.

use async_trait::async_trait;
use relay_core::EmailMessage;

use crate::error::Result;

/// A hosted service that accepts one email per call.
#[async_trait]
pub trait MailProvider: Send + Sync + std::fmt::Debug {
    /// Sends `message` authenticated with `api_key`.
    ///
    /// Called exactly once per relay request; implementations must not
    /// retry on their own.
    ///
    /// # Errors
    ///
    /// Returns a `MailError` when the provider cannot be reached or rejects
    /// the message.
    async fn send(&self, api_key: &str, message: &EmailMessage) -> Result<()>;
}
