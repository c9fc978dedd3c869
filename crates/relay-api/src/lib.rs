//! HTTP surface of the visit relay.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use relay_core::{Clock, RealClock, SettingsSource};
use relay_mail::MailProvider;

pub mod config;
pub mod handlers;
pub mod server;
pub mod settings;

pub use config::Config;
pub use server::{create_router, start_server};
pub use settings::EnvSettings;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Mail provider used for delivery
    pub provider: Arc<dyn MailProvider>,
    /// Source of per-request mail settings
    pub settings: Arc<dyn SettingsSource>,
    /// Clock used to stamp reports without a timestamp
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates state that reads settings from the environment and uses the
    /// system clock.
    pub fn new(provider: Arc<dyn MailProvider>) -> Self {
        Self { provider, settings: Arc::new(EnvSettings), clock: Arc::new(RealClock::new()) }
    }

    /// Replaces the settings source.
    #[must_use]
    pub fn with_settings(mut self, settings: Arc<dyn SettingsSource>) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
