//! Test infrastructure for the visit relay.
//!
//! Provides an in-memory mail provider that records what it was asked to
//! send, a settings source with fixed values, a wiremock-backed stand-in
//! for the SendGrid API, a clock pinned to a known instant, and an
//! in-memory log capture.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod logs;
pub mod provider;
pub mod sendgrid;
pub mod settings;
pub mod time;

pub use logs::LogCapture;
pub use provider::{RecordingProvider, SentMail};
pub use sendgrid::MockSendGrid;
pub use settings::StaticSettings;
pub use time::TestClock;
