// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Relay crate.

use thiserror::Error;

/// Why a caption lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFailure {
    /// The video does not exist, is private, or cannot be played.
    VideoUnavailable,
    /// The uploader disabled captions for the video.
    CaptionsDisabled,
    /// No track matched the requested language.
    NoTranscriptFound,
    /// Any other failure talking to the caption provider.
    Retrieval,
}

/// The primary error type used across all Relay traits and handlers.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any external call was made.
    ///
    /// `code` is the stable short code reported on the wire.
    #[error("invalid input: {code}")]
    InvalidInput { code: &'static str },

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A call into the messaging account client failed.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The messaging account rejected a login step.
    #[error("authentication failed: {message}")]
    Auth {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The session directory could not be prepared.
    #[error("session storage error: {source}")]
    Session { source: std::io::Error },

    /// A caption lookup failed.
    #[error("caption error: {message}")]
    Captions {
        failure: CaptionFailure,
        message: String,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Build an upstream error from any displayable failure, keeping it as the source.
    pub fn upstream<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Upstream {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Build an upstream error carrying only a message.
    pub fn upstream_message(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Build a caption error of the given kind.
    pub fn captions(failure: CaptionFailure, message: impl Into<String>) -> Self {
        Self::Captions {
            failure,
            message: message.into(),
        }
    }

    /// The message reported to HTTP callers.
    ///
    /// Input errors report their short code, upstream and auth errors the raw
    /// message of the underlying failure, everything else its display form.
    pub fn wire_message(&self) -> String {
        match self {
            Self::InvalidInput { code } => (*code).to_string(),
            Self::Upstream { message, .. }
            | Self::Auth { message, .. }
            | Self::Captions { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_message_uses_short_code_for_input_errors() {
        let err = RelayError::InvalidInput {
            code: "peer_required",
        };
        assert_eq!(err.wire_message(), "peer_required");
    }

    #[test]
    fn wire_message_keeps_raw_upstream_message() {
        let err = RelayError::upstream(std::io::Error::other("Cannot find any entity"));
        assert_eq!(err.wire_message(), "Cannot find any entity");
        assert!(err.to_string().starts_with("upstream error"));
    }

    #[test]
    fn captions_constructor_sets_failure() {
        let err = RelayError::captions(CaptionFailure::CaptionsDisabled, "disabled");
        assert!(matches!(
            err,
            RelayError::Captions {
                failure: CaptionFailure::CaptionsDisabled,
                ..
            }
        ));
    }
}
