//! Outbound email messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{render, report::EventReport, settings::MailSettings};

/// A fully rendered notification, ready for a mail provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Sender address
    pub from: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html: String,
    /// Plain-text body
    pub text: String,
}

impl EmailMessage {
    /// Renders a report into a message addressed per `settings`.
    ///
    /// `now` stamps reports that carry no usable timestamp.
    pub fn compose(report: &EventReport, settings: &MailSettings, now: DateTime<Utc>) -> Self {
        Self {
            to: settings.recipient.clone(),
            from: settings.sender.clone(),
            subject: render::subject(report),
            html: render::html_body(report, now),
            text: render::text_body(report, now),
        }
    }
}
