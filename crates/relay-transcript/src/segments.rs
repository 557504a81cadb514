// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cue normalization and full-text assembly.

use relay_core::types::{RawSegment, TranscriptSegment};

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize raw cues; missing timing becomes `0.0`, missing text empty.
pub fn build_segments(raw: Vec<RawSegment>) -> Vec<TranscriptSegment> {
    raw.into_iter()
        .map(|segment| TranscriptSegment {
            start: segment.start.unwrap_or(0.0),
            duration: segment.duration.unwrap_or(0.0),
            text: segment
                .text
                .as_deref()
                .map(normalize_text)
                .unwrap_or_default(),
        })
        .collect()
}

/// Join the non-empty segment texts with single spaces.
pub fn join_text(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
