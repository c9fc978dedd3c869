//! Event relay handler.
//!
//! Accepts a website event report and forwards it as a single email. The
//! handler is a straight line with early exits; every path ends in exactly
//! one response and at most one provider call.

use axum::{
    extract::{FromRequest, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use relay_core::{EmailMessage, EventReport, RelayError};
use tracing::{debug, error, info, instrument, warn, Span};

use crate::AppState;

/// Relays an event report to the configured recipient.
///
/// # Responses
///
/// - 200 `OK`: the provider accepted the message
/// - 405 `Method Not Allowed`: any verb other than `POST`
/// - 500 `Server misconfigured`: mail settings are missing
/// - 500 `Failed to send email`: the provider call failed
///
/// A body that is not JSON is not an error; it is relayed under `raw`.
/// The body is only buffered after the method check, so an oversized
/// non-POST request still gets 405.
#[instrument(
    name = "relay_event",
    skip(state, request),
    fields(method = %request.method(), body_len = tracing::field::Empty)
)]
pub async fn relay_event(State(state): State<AppState>, request: Request) -> Response {
    if request.method() != Method::POST {
        return error_response(&RelayError::MethodNotAllowed);
    }

    let body = match Bytes::from_request(request, &state).await {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Failed to read request body");
            return rejection.into_response();
        },
    };
    Span::current().record("body_len", body.len());

    let settings = match state.settings.load() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Relay is missing mail settings");
            return error_response(&e);
        },
    };

    let report = EventReport::from_body(&body);
    if report.is_raw_fallback() {
        debug!("Request body is not JSON, relaying it as raw text");
    }

    let message = EmailMessage::compose(&report, &settings, state.clock.now_utc());
    debug!(subject = %message.subject, "Notification rendered");

    match state.provider.send(&settings.api_key, &message).await {
        Ok(()) => {
            info!(subject = %message.subject, "Notification email sent");
            (StatusCode::OK, "OK").into_response()
        },
        Err(e) => {
            error!(error = %e, client_side = e.is_client_side(), "Email provider call failed");
            error_response(&RelayError::DeliveryFailed(e.to_string()))
        },
    }
}

/// Maps a relay error onto its fixed plain-text response.
pub fn error_response(error: &RelayError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error.public_message()).into_response()
}
