//! Visit relay service.
//!
//! Main entry point. Loads configuration, builds the provider client and
//! serves the relay until a shutdown signal arrives.

use std::sync::Arc;

use anyhow::{Context, Result};
use relay_api::{AppState, Config};
use relay_mail::SendGridClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    info!("Starting visit relay");

    let addr = config.parse_server_addr()?;
    info!(
        server_addr = %addr,
        api_url = %config.sendgrid_api_url,
        delivery_timeout_seconds = config.delivery_timeout_seconds,
        max_body_bytes = config.max_body_bytes,
        "Configuration loaded"
    );

    let client = SendGridClient::new(config.to_client_config())
        .context("Failed to create SendGrid client")?;
    let state = AppState::new(Arc::new(client));

    relay_api::start_server(state, addr, config.max_body_bytes)
        .await
        .context("HTTP server failed")?;

    info!("Visit relay shutdown complete");
    Ok(())
}

/// Initializes tracing from `RUST_LOG`, falling back to the configured
/// filter.
fn init_tracing(config: &Config) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!(
                "{},visit_relay=debug,relay_api=debug,relay_mail=debug,tower_http=debug",
                config.rust_log
            ))
        })
        .context("Invalid log filter")?;

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry.with(fmt::layer().json().with_current_span(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true).with_file(true).with_line_number(true)).init();
    }

    Ok(())
}
