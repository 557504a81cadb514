// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock caption provider with scripted tracks and cues per video.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use relay_core::types::{CaptionTrack, RawSegment};
use relay_core::{CaptionFailure, CaptionSource, RelayError};

/// A caption provider that serves fixed tracks.
///
/// Unknown videos report [`CaptionFailure::VideoUnavailable`]. Track handles
/// are `<video_id>:<language_code>[:asr]`.
#[derive(Default)]
pub struct MockCaptionSource {
    videos: HashMap<String, Result<Vec<CaptionTrack>, CaptionFailure>>,
    cues: HashMap<String, Result<Vec<RawSegment>, CaptionFailure>>,
    list_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockCaptionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track to `video_id` with the given cues `(start, duration, text)`.
    pub fn with_track(
        mut self,
        video_id: &str,
        language_code: &str,
        generated: bool,
        cues: &[(f64, f64, &str)],
    ) -> Self {
        let handle = format!(
            "{video_id}:{language_code}{}",
            if generated { ":asr" } else { "" }
        );
        let track = CaptionTrack {
            language_code: language_code.to_string(),
            name: language_code.to_string(),
            is_generated: generated,
            handle: handle.clone(),
        };
        if let Ok(tracks) = self
            .videos
            .entry(video_id.to_string())
            .or_insert_with(|| Ok(Vec::new()))
        {
            tracks.push(track);
        }
        let segments = cues
            .iter()
            .map(|(start, duration, text)| RawSegment {
                start: Some(*start),
                duration: Some(*duration),
                text: Some(text.to_string()),
            })
            .collect();
        self.cues.insert(handle, Ok(segments));
        self
    }

    /// Add a track whose cues are given as raw segments.
    pub fn with_raw_track(
        mut self,
        video_id: &str,
        language_code: &str,
        segments: Vec<RawSegment>,
    ) -> Self {
        self = self.with_track(video_id, language_code, false, &[]);
        self.cues
            .insert(format!("{video_id}:{language_code}"), Ok(segments));
        self
    }

    /// Make listing the tracks of `video_id` fail.
    pub fn with_list_failure(mut self, video_id: &str, failure: CaptionFailure) -> Self {
        self.videos.insert(video_id.to_string(), Err(failure));
        self
    }

    /// Make downloading a track of `video_id` fail.
    pub fn with_fetch_failure(
        mut self,
        video_id: &str,
        language_code: &str,
        failure: CaptionFailure,
    ) -> Self {
        self = self.with_track(video_id, language_code, false, &[]);
        self.cues
            .insert(format!("{video_id}:{language_code}"), Err(failure));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptionSource for MockCaptionSource {
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, RelayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.videos.get(video_id) {
            Some(Ok(tracks)) => Ok(tracks.clone()),
            Some(Err(failure)) => Err(RelayError::captions(*failure, "scripted failure")),
            None => Err(RelayError::captions(
                CaptionFailure::VideoUnavailable,
                format!("unknown video {video_id}"),
            )),
        }
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<RawSegment>, RelayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.cues.get(&track.handle) {
            Some(Ok(segments)) => Ok(segments.clone()),
            Some(Err(failure)) => Err(RelayError::captions(*failure, "scripted failure")),
            None => Err(RelayError::captions(
                CaptionFailure::Retrieval,
                format!("unknown track {}", track.handle),
            )),
        }
    }
}
