// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route for the transcript service: `POST /transcript`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use relay_transcript::{TranscriptError, TranscriptService};
use serde::Deserialize;
use tracing::{info, warn};

use crate::envelope;

#[derive(Debug, Deserialize)]
struct TranscriptRequest {
    #[serde(default)]
    url: String,
    #[serde(default)]
    language: Option<String>,
}

/// Build the transcript router. Unknown paths answer `404` and other
/// methods on `/transcript` answer `405`, both with a `detail` body.
pub fn transcript_router(service: Arc<TranscriptService>) -> Router {
    Router::new()
        .route(
            "/transcript",
            post(post_transcript).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(service)
}

async fn not_found() -> Response {
    envelope::detail(StatusCode::NOT_FOUND, "Not Found")
}

async fn method_not_allowed() -> Response {
    envelope::detail(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn status_of(err: &TranscriptError) -> StatusCode {
    match err {
        TranscriptError::InvalidUrl => StatusCode::BAD_REQUEST,
        TranscriptError::VideoUnavailable
        | TranscriptError::CaptionsDisabled
        | TranscriptError::NoTranscript
        | TranscriptError::NoSegments => StatusCode::NOT_FOUND,
        TranscriptError::Retrieval(_) => StatusCode::BAD_GATEWAY,
    }
}

/// POST /transcript with `{url, language?}`.
pub async fn post_transcript(
    State(service): State<Arc<TranscriptService>>,
    body: Bytes,
) -> Response {
    let request: TranscriptRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            return envelope::detail(StatusCode::BAD_REQUEST, &format!("Invalid request body: {e}"))
        }
    };
    if request.url.trim().is_empty() {
        return envelope::detail(StatusCode::BAD_REQUEST, "Field 'url' is required.");
    }

    match service
        .transcribe(&request.url, request.language.as_deref())
        .await
    {
        Ok(transcript) => {
            info!(
                language = %transcript.language,
                segments = transcript.segments.len(),
                "transcript served"
            );
            (StatusCode::OK, Json(transcript)).into_response()
        }
        Err(e) => {
            let status = status_of(&e);
            match &e {
                TranscriptError::Retrieval(source) => {
                    warn!(url = %request.url, error = %source, "caption retrieval failed")
                }
                other => info!(url = %request.url, status = status.as_u16(), reason = %other, "no transcript"),
            }
            envelope::detail(status, &e.to_string())
        }
    }
}
