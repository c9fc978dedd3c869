//! Error types for provider calls.
//!
//! Covers transport failures, timeouts and provider rejections. The
//! `Display` text includes the provider's own error detail so it lands in
//! the server log; none of it is shown to relay callers.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Failure of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    /// Network-level connectivity failure.
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// Provider did not answer in time.
    #[error("request timeout after {timeout:?}")]
    Timeout {
        /// Configured request timeout
        timeout: Duration,
    },

    /// Provider answered with a non-success status.
    #[error("provider rejected message: HTTP {status_code}: {detail}")]
    Rejected {
        /// HTTP status code returned by the provider
        status_code: u16,
        /// Provider error messages, or the raw response body
        detail: String,
    },

    /// Client could not be built from its configuration.
    #[error("invalid provider configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl MailError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    /// Creates a rejection error from a provider response.
    pub fn rejected(status_code: u16, detail: impl Into<String>) -> Self {
        Self::Rejected { status_code, detail: detail.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Returns true when the failure points at our request rather than the
    /// provider: bad key, unverified sender, malformed payload.
    pub fn is_client_side(&self) -> bool {
        match self {
            Self::Rejected { status_code, .. } => (400..500).contains(status_code),
            Self::Configuration { .. } => true,
            Self::Network { .. } | Self::Timeout { .. } => false,
        }
    }
}
