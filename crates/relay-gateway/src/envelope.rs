// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON response envelopes.
//!
//! The bridge answers `{ok, result}` or `{ok, error}`; the transcript service
//! answers its payload directly or `{detail}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::RelayError;
use serde::Serialize;

/// Error code for unknown routes and wrong methods.
pub const NOT_FOUND: &str = "not_found";

#[derive(Debug, Serialize)]
struct OkEnvelope<T> {
    ok: bool,
    result: T,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    ok: bool,
    error: &'a str,
}

#[derive(Debug, Serialize)]
struct Detail<'a> {
    detail: &'a str,
}

/// `200 {ok: true, result}`.
pub fn ok<T: Serialize>(result: T) -> Response {
    (StatusCode::OK, Json(OkEnvelope { ok: true, result })).into_response()
}

/// `{ok: false, error}` with the given status.
pub fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorEnvelope {
            ok: false,
            error: message,
        }),
    )
        .into_response()
}

/// `404 {ok: false, error: "not_found"}`.
pub fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, NOT_FOUND)
}

/// Map a bridge error onto its status and envelope.
///
/// Input errors are 400 with their short code; everything else is 500 with
/// the underlying message.
pub fn bridge_error(err: &RelayError) -> Response {
    let status = match err {
        RelayError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        RelayError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error(status, &err.wire_message())
}

/// `{detail}` with the given status.
pub fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(Detail { detail: message })).into_response()
}
