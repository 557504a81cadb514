// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Relay facades.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Relay configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Messaging account credentials.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Session file location.
    #[serde(default)]
    pub session: SessionConfig,

    /// Messaging bridge HTTP listener.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Non-interactive login overrides.
    #[serde(default)]
    pub login: LoginConfig,

    /// Transcript service HTTP listener and provider settings.
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Messaging account credentials.
///
/// All three values are required by `relay bridge`; they stay optional here so
/// the transcript service can run without them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Application id issued by the messaging network.
    #[serde(default)]
    pub api_id: Option<i32>,

    /// Application secret paired with `api_id`.
    #[serde(default)]
    pub api_hash: Option<String>,

    /// Phone number of the account, in international format.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Session file location.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Directory holding the session file. `None` uses the `session`
    /// directory next to the installed binary.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Messaging bridge HTTP listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Address to bind.
    #[serde(default = "default_bind_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_bridge_port")]
    pub port: u16,

    /// Raw messages fetched per poll when the caller omits `limit`.
    #[serde(default = "default_poll_limit")]
    pub default_limit: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: default_bind_host(),
            port: default_bridge_port(),
            default_limit: default_poll_limit(),
        }
    }
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_bridge_port() -> u16 {
    8081
}

fn default_poll_limit() -> u32 {
    20
}

/// Non-interactive login overrides.
///
/// Any value left unset is asked for on the console during the first login.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoginConfig {
    /// One-time login code.
    #[serde(default)]
    pub code: Option<String>,

    /// Second-factor password. Checked before `login_password`.
    #[serde(default)]
    pub password: Option<String>,

    /// Alternate second-factor password setting.
    #[serde(default)]
    pub login_password: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Transcript service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptConfig {
    /// Address to bind.
    #[serde(default = "default_bind_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_transcript_port")]
    pub port: u16,

    /// Per-request timeout for caption provider calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            host: default_bind_host(),
            port: default_transcript_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_transcript_port() -> u16 {
    8000
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
