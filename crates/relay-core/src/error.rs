//! Error taxonomy for relay requests.
//!
//! Each variant terminates the current request with a fixed response. The
//! caller only ever sees [`RelayError::public_message`]; the `Display` text
//! carries the detail that goes to the server log.

use thiserror::Error;

/// Result type alias using `RelayError`.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Terminal failures of a single relay request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The caller used a verb other than `POST`.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Required mail settings are absent or empty.
    #[error("missing mail settings: {}", missing.join(", "))]
    Misconfigured {
        /// Names of the environment variables that were not usable
        missing: Vec<&'static str>,
    },

    /// The mail provider call failed or was rejected.
    #[error("email delivery failed: {0}")]
    DeliveryFailed(String),
}

impl RelayError {
    /// HTTP status code returned to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::Misconfigured { .. } | Self::DeliveryFailed(_) => 500,
        }
    }

    /// Response body returned to the caller. Never includes detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Misconfigured { .. } => "Server misconfigured",
            Self::DeliveryFailed(_) => "Failed to send email",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_response_contract() {
        assert_eq!(RelayError::MethodNotAllowed.status_code(), 405);
        assert_eq!(RelayError::Misconfigured { missing: vec!["SENDER_EMAIL"] }.status_code(), 500);
        assert_eq!(RelayError::DeliveryFailed("boom".into()).status_code(), 500);
    }

    #[test]
    fn public_messages_hide_detail() {
        let err = RelayError::DeliveryFailed("HTTP 401: invalid api key SG.secret".into());
        assert_eq!(err.public_message(), "Failed to send email");
        assert!(err.to_string().contains("invalid api key"));

        let err = RelayError::Misconfigured { missing: vec!["SENDGRID_API_KEY", "RECIPIENT_EMAIL"] };
        assert_eq!(err.public_message(), "Server misconfigured");
        assert_eq!(err.to_string(), "missing mail settings: SENDGRID_API_KEY, RECIPIENT_EMAIL");
    }
}
