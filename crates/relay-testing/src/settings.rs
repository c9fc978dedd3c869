//! Fixed mail settings.

use std::collections::HashMap;

use relay_core::{
    settings::{API_KEY_VAR, RECIPIENT_VAR, SENDER_VAR},
    MailSettings, Result, SettingsSource,
};

/// Test API key used by [`StaticSettings::valid`].
pub const TEST_API_KEY: &str = "SG.test-key";

/// Test recipient used by [`StaticSettings::valid`].
pub const TEST_RECIPIENT: &str = "owner@example.com";

/// Test sender used by [`StaticSettings::valid`].
pub const TEST_SENDER: &str = "relay@example.com";

/// Settings source backed by an in-memory variable map.
///
/// Goes through the same validation as the environment source, so empty
/// and missing values behave identically.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    vars: HashMap<&'static str, String>,
}

impl StaticSettings {
    /// All three settings present.
    pub fn valid() -> Self {
        Self::empty()
            .with(API_KEY_VAR, TEST_API_KEY)
            .with(RECIPIENT_VAR, TEST_RECIPIENT)
            .with(SENDER_VAR, TEST_SENDER)
    }

    /// No settings at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets one variable.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.vars.insert(name, value.into());
        self
    }

    /// Removes one variable.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.vars.remove(name);
        self
    }
}

impl SettingsSource for StaticSettings {
    fn load(&self) -> Result<MailSettings> {
        MailSettings::from_lookup(|name| self.vars.get(name).cloned())
    }
}
