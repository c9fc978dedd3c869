//! Transactional email delivery for the visit relay.
//!
//! The relay talks to its provider through the [`MailProvider`] trait. The
//! production implementation is [`SendGridClient`], which posts one message
//! per call to the SendGrid v3 `mail/send` endpoint. There is no retry
//! layer: a failed send is reported to the caller and dropped.
//!
//! # Example
//!
//! ```no_run
//! use relay_core::EmailMessage;
//! use relay_mail::{ClientConfig, MailProvider, SendGridClient};
//!
//! # async fn example(message: EmailMessage) -> relay_mail::Result<()> {
//! let client = SendGridClient::new(ClientConfig::default())?;
//! client.send("SG.api-key", &message).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod provider;

pub use client::{ClientConfig, SendGridClient};
pub use error::{MailError, Result};
pub use provider::MailProvider;

/// Default SendGrid API base URL.
pub const DEFAULT_API_URL: &str = "https://api.sendgrid.com";

/// Default provider request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
