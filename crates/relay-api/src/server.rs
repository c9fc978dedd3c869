//! HTTP server configuration and request routing.
//!
//! Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response tracing
//! 3. Body size limit
//! 4. Handler execution
//!
//! The relay is served both at `/send-visit` and at the path the hosted
//! function used, `/.netlify/functions/send-visit`, so existing tracking
//! snippets keep working unchanged.

use std::net::SocketAddr;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{handlers, AppState};

/// Path of the relay endpoint.
pub const RELAY_PATH: &str = "/send-visit";

/// Path the relay was served at as a hosted function.
pub const LEGACY_RELAY_PATH: &str = "/.netlify/functions/send-visit";

/// Creates the Axum router with all routes and middleware.
///
/// The relay routes accept every method; the handler itself answers
/// non-POST requests so the 405 body is the plain-text contract rather
/// than the framework default.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    let relay_routes = Router::new()
        .route(RELAY_PATH, any(handlers::relay_event))
        .route(LEGACY_RELAY_PATH, any(handlers::relay_event))
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(relay_routes)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject request ID into all responses.
async fn inject_request_id(mut req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// # Errors
///
/// Returns `std::io::Error` if the address cannot be bound.
pub async fn start_server(
    state: AppState,
    addr: SocketAddr,
    max_body_bytes: usize,
) -> Result<(), std::io::Error> {
    let app = create_router(state, max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    warn!("Waiting for in-flight requests to complete");
}
