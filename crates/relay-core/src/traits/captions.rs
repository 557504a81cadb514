// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caption provider trait for the transcript service.

use async_trait::async_trait;

use crate::error::RelayError;
use crate::types::{CaptionTrack, RawSegment};

/// Source of caption tracks for videos.
///
/// Failures carry a [`crate::error::CaptionFailure`] so callers can tell an
/// unavailable video apart from disabled captions or a transport failure.
#[async_trait]
pub trait CaptionSource: Send + Sync + 'static {
    /// Lists every caption track available for `video_id`, in provider order.
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, RelayError>;

    /// Downloads the cues of one track.
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<RawSegment>, RelayError>;
}
