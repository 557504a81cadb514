// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caption transcripts for videos.
//!
//! [`TranscriptService`] turns a video URL and an optional language into the
//! caption text of the best matching track, using any [`CaptionSource`].

pub mod segments;
pub mod selector;
pub mod video_id;
pub mod youtube;

use std::sync::Arc;

use relay_core::types::TranscriptSegment;
use relay_core::{CaptionFailure, CaptionSource, RelayError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use video_id::parse_video_id;
pub use youtube::YoutubeCaptionSource;

/// Why a transcript could not be produced. `Display` is the caller-facing detail.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Invalid YouTube URL. Provide a full watch, embed, shorts, or youtu.be URL.")]
    InvalidUrl,

    #[error("Video unavailable or private.")]
    VideoUnavailable,

    #[error("Captions are disabled for this video.")]
    CaptionsDisabled,

    #[error("No captions available for the requested language.")]
    NoTranscript,

    #[error("No caption segments found.")]
    NoSegments,

    #[error("Unable to retrieve captions from YouTube.")]
    Retrieval(#[source] RelayError),
}

impl From<RelayError> for TranscriptError {
    fn from(err: RelayError) -> Self {
        let failure = match &err {
            RelayError::Captions { failure, .. } => Some(*failure),
            _ => None,
        };
        match failure {
            Some(CaptionFailure::VideoUnavailable) => Self::VideoUnavailable,
            Some(CaptionFailure::CaptionsDisabled) => Self::CaptionsDisabled,
            Some(CaptionFailure::NoTranscriptFound) => Self::NoTranscript,
            Some(CaptionFailure::Retrieval) | None => Self::Retrieval(err),
        }
    }
}

/// A produced transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub text: String,
    pub source: &'static str,
    pub language: String,
    pub segments: Vec<TranscriptSegment>,
}

/// Produces transcripts from a caption source.
pub struct TranscriptService {
    source: Arc<dyn CaptionSource>,
}

impl TranscriptService {
    pub fn new(source: Arc<dyn CaptionSource>) -> Self {
        Self { source }
    }

    /// Transcribe the video behind `url`, preferring `language` when given.
    pub async fn transcribe(
        &self,
        url: &str,
        language: Option<&str>,
    ) -> Result<Transcript, TranscriptError> {
        let video_id = parse_video_id(url).ok_or(TranscriptError::InvalidUrl)?;

        let tracks = self.source.list_tracks(&video_id).await?;
        let track = selector::select(&tracks, language).ok_or(TranscriptError::NoTranscript)?;
        debug!(
            video_id,
            language = %track.language_code,
            generated = track.is_generated,
            "caption track selected"
        );

        let raw = self.source.fetch_track(track).await.inspect_err(|e| {
            warn!(video_id, error = %e, "caption fetch failed");
        })?;
        let segments = segments::build_segments(raw);
        if segments.is_empty() {
            return Err(TranscriptError::NoSegments);
        }

        Ok(Transcript {
            text: segments::join_text(&segments),
            source: "captions",
            language: track.language_code.clone(),
            segments,
        })
    }
}
