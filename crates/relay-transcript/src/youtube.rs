// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YouTube caption source.
//!
//! Track listing goes through the innertube player endpoint: the watch page is
//! fetched for its API key, then the player response is queried with an
//! Android client context. Tracks are timedtext XML documents.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use relay_config::model::TranscriptConfig;
use relay_core::types::{CaptionTrack, RawSegment};
use relay_core::{CaptionFailure, CaptionSource, RelayError};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Public YouTube origin.
pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static API_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid regex")
});

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|amp|lt|gt|quot|apos|nbsp);").expect("valid regex")
});

// --- innertube player response ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    #[serde(default)]
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Option<Vec<PlayerTrack>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    name: Option<TrackName>,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    #[serde(default)]
    runs: Vec<TextRun>,
    #[serde(default)]
    simple_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

impl From<PlayerTrack> for CaptionTrack {
    fn from(track: PlayerTrack) -> Self {
        let name = track
            .name
            .and_then(|n| n.runs.into_iter().next().map(|r| r.text).or(n.simple_text))
            .unwrap_or_else(|| track.language_code.clone());
        CaptionTrack {
            name,
            is_generated: track.kind.as_deref() == Some("asr"),
            handle: track.base_url.replace("&fmt=srv3", ""),
            language_code: track.language_code,
        }
    }
}

// --- timedtext document ---

#[derive(Debug, Deserialize)]
struct Timedtext {
    #[serde(rename = "text", default)]
    cues: Vec<Cue>,
}

#[derive(Debug, Deserialize)]
struct Cue {
    #[serde(rename = "@start", default)]
    start: Option<String>,
    #[serde(rename = "@dur", default)]
    dur: Option<String>,
    #[serde(rename = "$text", default)]
    text: Option<String>,
}

/// Caption source backed by YouTube's public endpoints.
pub struct YoutubeCaptionSource {
    client: reqwest::Client,
    base_url: String,
}

impl YoutubeCaptionSource {
    pub fn new(config: &TranscriptConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RelayError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: YOUTUBE_BASE_URL.to_string(),
        })
    }

    /// Point the source at another origin (for testing with wiremock).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, RelayError> {
        let response = request.send().await.map_err(retrieval)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::captions(
                CaptionFailure::Retrieval,
                format!("YouTube returned {status}"),
            ));
        }
        response.text().await.map_err(retrieval)
    }

    async fn api_key(&self, video_id: &str) -> Result<String, RelayError> {
        let request = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US");
        let html = self.get_text(request).await?;

        match API_KEY_PATTERN.captures(&html).and_then(|c| c.get(1)) {
            Some(key) => Ok(key.as_str().to_string()),
            None if html.contains("class=\"g-recaptcha\"") => Err(RelayError::captions(
                CaptionFailure::Retrieval,
                "YouTube is blocking requests from this address",
            )),
            None => Err(RelayError::captions(
                CaptionFailure::Retrieval,
                "watch page carried no innertube API key",
            )),
        }
    }
}

fn retrieval(err: reqwest::Error) -> RelayError {
    RelayError::captions(CaptionFailure::Retrieval, err.to_string())
}

/// Map a non-OK playability status onto a caption failure.
///
/// Only removed or private videos count as unavailable. Age gates, bot
/// checks and unplayable videos are retrieval failures.
fn playability_failure(status: &PlayabilityStatus) -> Option<RelayError> {
    let code = status.status.as_deref().unwrap_or("OK");
    if code == "OK" {
        return None;
    }
    let reason = status.reason.clone().unwrap_or_else(|| code.to_string());
    let private = code == "LOGIN_REQUIRED" && reason.to_lowercase().contains("private");
    let failure = if code == "ERROR" || private {
        CaptionFailure::VideoUnavailable
    } else {
        CaptionFailure::Retrieval
    };
    Some(RelayError::captions(failure, reason))
}

/// Parse a timedtext document into raw cues.
pub fn parse_timedtext(xml: &str) -> Result<Vec<RawSegment>, RelayError> {
    let doc: Timedtext = quick_xml::de::from_str(xml).map_err(|e| {
        RelayError::captions(CaptionFailure::Retrieval, format!("malformed timedtext: {e}"))
    })?;
    Ok(doc
        .cues
        .into_iter()
        .map(|cue| RawSegment {
            start: cue.start.and_then(|s| s.trim().parse().ok()),
            duration: cue.dur.and_then(|s| s.trim().parse().ok()),
            text: cue.text.map(|t| clean_cue_text(&t)),
        })
        .collect())
}

/// Decode entities left over after XML unescaping and drop formatting tags.
fn clean_cue_text(text: &str) -> String {
    let decoded = decode_entities(text);
    TAG_PATTERN.replace_all(&decoded, "").into_owned()
}

fn decode_entities(text: &str) -> String {
    ENTITY_PATTERN
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => {
                    let digits = &entity[1..];
                    let code = match digits.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => digits.parse().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[async_trait]
impl CaptionSource for YoutubeCaptionSource {
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, RelayError> {
        let api_key = self.api_key(video_id).await?;
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });
        let request = self
            .client
            .post(format!("{}/youtubei/v1/player", self.base_url))
            .query(&[("key", api_key.as_str())])
            .json(&body);
        let text = self.get_text(request).await?;
        let player: PlayerResponse = serde_json::from_str(&text).map_err(|e| {
            RelayError::captions(CaptionFailure::Retrieval, format!("malformed player response: {e}"))
        })?;

        if let Some(err) = player.playability_status.as_ref().and_then(playability_failure) {
            debug!(video_id, error = %err, "video not playable");
            return Err(err);
        }

        let tracks = player
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .and_then(|r| r.caption_tracks)
            .ok_or_else(|| {
                RelayError::captions(CaptionFailure::CaptionsDisabled, "no caption tracklist")
            })?;

        debug!(video_id, tracks = tracks.len(), "caption tracks listed");
        Ok(tracks.into_iter().map(CaptionTrack::from).collect())
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<RawSegment>, RelayError> {
        let xml = self.get_text(self.client.get(&track.handle)).await?;
        let segments = parse_timedtext(&xml)?;
        if segments.is_empty() {
            warn!(language = %track.language_code, "caption track has no cues");
        }
        Ok(segments)
    }
}
