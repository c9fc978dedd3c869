//! Core domain types for the visit relay.
//!
//! An inbound [`EventReport`] describes something that happened on a
//! website. It is rendered into an [`EmailMessage`] addressed with the
//! [`MailSettings`] loaded for the current request, and handed to a mail
//! provider. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod message;
pub mod render;
pub mod report;
pub mod settings;
pub mod time;

pub use error::{RelayError, Result};
pub use message::EmailMessage;
pub use report::EventReport;
pub use settings::{MailSettings, SettingsSource};
pub use time::{Clock, RealClock};
