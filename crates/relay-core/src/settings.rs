//! Mail settings resolved per request.
//!
//! The relay reads its provider key and addresses when a request arrives,
//! not at startup, so a deployment with missing values still answers with
//! a proper error response.

use std::fmt;

use crate::error::{RelayError, Result};

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "SENDGRID_API_KEY";

/// Environment variable holding the notification recipient.
pub const RECIPIENT_VAR: &str = "RECIPIENT_EMAIL";

/// Environment variable holding the verified sender address.
pub const SENDER_VAR: &str = "SENDER_EMAIL";

/// Credentials and addresses needed to send one notification.
#[derive(Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Provider API key
    pub api_key: String,
    /// Address that receives notifications
    pub recipient: String,
    /// Sender address, verified with the provider out of band
    pub sender: String,
}

impl MailSettings {
    /// Builds settings from a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Misconfigured` listing every variable that is
    /// absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            },
        };

        let api_key = read(API_KEY_VAR);
        let recipient = read(RECIPIENT_VAR);
        let sender = read(SENDER_VAR);

        if !missing.is_empty() {
            return Err(RelayError::Misconfigured { missing });
        }

        Ok(Self { api_key, recipient, sender })
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("api_key", &"***")
            .field("recipient", &self.recipient)
            .field("sender", &self.sender)
            .finish()
    }
}

/// Source of mail settings, consulted once per request.
pub trait SettingsSource: Send + Sync + fmt::Debug {
    /// Loads the current settings.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Misconfigured` when any value is unusable.
    fn load(&self) -> Result<MailSettings>;
}
