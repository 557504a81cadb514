// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types passed across the Relay traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// --- Messaging types ---

/// Kind of entity a peer identifier resolved to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PeerKind {
    User,
    Group,
    Channel,
}

/// An addressable conversation entity returned by peer resolution.
///
/// Only valid for the request that resolved it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeer {
    /// Numeric entity id on the messaging network.
    pub id: i64,
    /// Entity kind.
    pub kind: PeerKind,
    /// Access hash required by the network for users and channels.
    #[serde(default)]
    pub access_hash: Option<i64>,
}

/// A message as reported by the messaging account client.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteMessage {
    /// Message id, strictly increasing within one conversation.
    pub id: i64,
    /// Message text, if the message carries any.
    pub text: Option<String>,
    /// Whether the account itself sent the message.
    pub outgoing: bool,
    /// When the message was sent.
    pub date: Option<DateTime<Utc>>,
}

/// Wire projection of a [`RemoteMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: i64,
    pub text: String,
    pub out: bool,
    pub date: Option<String>,
}

impl From<&RemoteMessage> for MessageView {
    fn from(msg: &RemoteMessage) -> Self {
        Self {
            id: msg.id,
            text: msg.text.clone().unwrap_or_default(),
            out: msg.outgoing,
            date: msg.date.map(|d| d.to_rfc3339()),
        }
    }
}

impl From<RemoteMessage> for MessageView {
    fn from(msg: RemoteMessage) -> Self {
        Self {
            id: msg.id,
            text: msg.text.unwrap_or_default(),
            out: msg.outgoing,
            date: msg.date.map(|d| d.to_rfc3339()),
        }
    }
}

/// Token returned when a login code was requested, needed to sign in with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCodeToken {
    pub phone_code_hash: String,
}

/// Result of submitting a login code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The account is now authorized.
    Authorized,
    /// The account has a second factor; a password must follow.
    PasswordRequired,
}

// --- Caption types ---

/// A caption track available for a video.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    /// Language code as reported by the provider (e.g. `en`, `pt-BR`).
    pub language_code: String,
    /// Human-readable language name.
    pub name: String,
    /// `true` for machine-generated (speech recognition) tracks.
    pub is_generated: bool,
    /// Provider-specific handle used to fetch the track body.
    pub handle: String,
}

/// One caption cue as returned by the provider, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSegment {
    pub start: Option<f64>,
    pub duration: Option<f64>,
    pub text: Option<String>,
}

/// A normalized caption cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}
