//! Process environment as the source of mail settings.

use relay_core::{MailSettings, Result, SettingsSource};

/// Reads `SENDGRID_API_KEY`, `RECIPIENT_EMAIL` and `SENDER_EMAIL` from the
/// process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn load(&self) -> Result<MailSettings> {
        MailSettings::from_lookup(|name| std::env::var(name).ok())
    }
}
