// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./relay.toml` > `~/.config/relay/relay.toml` > `/etc/relay/relay.toml`
//! with environment variable overrides via the `RELAY_` prefix and the
//! service's established `TELEGRAM_*` / `TRANSCRIPT_*` variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::Value,
    Figment,
};

use crate::model::RelayConfig;

/// Top-level sections, used to map `RELAY_<SECTION>_<KEY>` onto `section.key`.
const SECTIONS: &[&str] = &[
    "telegram",
    "session",
    "bridge",
    "login",
    "transcript",
    "log",
];

/// Keys whose values must stay strings even when they look numeric.
///
/// Login codes can start with `0` and phone numbers start with `+`, so these
/// never go through figment's value parsing.
const TEXT_KEYS: &[&str] = &[
    "telegram.api_hash",
    "telegram.phone",
    "session.dir",
    "bridge.host",
    "login.code",
    "login.password",
    "login.login_password",
    "transcript.host",
    "log.level",
];

/// How a service variable is merged into the figment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Text,
    Number,
}

/// The service's established environment variables and the keys they set.
const SERVICE_ENV: &[(&str, &str, ValueKind)] = &[
    ("TELEGRAM_API_ID", "telegram.api_id", ValueKind::Number),
    ("TELEGRAM_API_HASH", "telegram.api_hash", ValueKind::Text),
    ("TELEGRAM_PHONE", "telegram.phone", ValueKind::Text),
    ("TELEGRAM_SESSION_DIR", "session.dir", ValueKind::Text),
    ("TELEGRAM_BRIDGE_HOST", "bridge.host", ValueKind::Text),
    ("TELEGRAM_BRIDGE_PORT", "bridge.port", ValueKind::Number),
    ("TELEGRAM_LOGIN_CODE", "login.code", ValueKind::Text),
    ("TELEGRAM_PASSWORD", "login.password", ValueKind::Text),
    ("TELEGRAM_LOGIN_PASSWORD", "login.login_password", ValueKind::Text),
    ("TRANSCRIPT_HOST", "transcript.host", ValueKind::Text),
    ("TRANSCRIPT_PORT", "transcript.port", ValueKind::Number),
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/relay/relay.toml` (system-wide)
/// 3. `~/.config/relay/relay.toml` (user XDG config)
/// 4. `./relay.toml` (local directory)
/// 5. `RELAY_*` environment variables
/// 6. `TELEGRAM_*` / `TRANSCRIPT_*` service variables
pub fn load_config() -> Result<RelayConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<RelayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RelayConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RelayConfig, figment::Error> {
    let figment = Figment::new()
        .merge(Serialized::defaults(RelayConfig::default()))
        .merge(Toml::file(path));
    with_env_overrides(figment, Env::var).extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    let figment = Figment::new()
        .merge(Serialized::defaults(RelayConfig::default()))
        .merge(Toml::file("/etc/relay/relay.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("relay/relay.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("relay.toml"));
    with_env_overrides(figment, Env::var)
}

/// Layer every environment override on top of `figment`.
///
/// `lookup` resolves a variable name to its value; production passes
/// [`Env::var`], tests pass a fixed map.
pub(crate) fn with_env_overrides<F>(figment: Figment, lookup: F) -> Figment
where
    F: Fn(&str) -> Option<String>,
{
    let mut figment = figment.merge(env_provider());

    // Prefixed text keys, merged verbatim.
    for key in TEXT_KEYS {
        let var = format!("RELAY_{}", key.replace('.', "_").to_ascii_uppercase());
        if let Some(value) = present(lookup(&var)) {
            figment = figment.merge(Serialized::global(*key, value));
        }
    }

    for (var, key, kind) in SERVICE_ENV {
        let Some(value) = present(lookup(var)) else {
            continue;
        };
        figment = match kind {
            ValueKind::Text => figment.merge(Serialized::global(*key, value)),
            ValueKind::Number => {
                let parsed: Value = value.parse().unwrap_or_else(|never| match never {});
                figment.merge(Serialized::global(*key, parsed))
            }
        };
    }

    figment
}

/// Empty variables count as unset.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Create the `RELAY_*` provider using an explicit section mapping.
///
/// Uses a section table instead of `Env::split("_")`, since key names contain
/// underscores: `RELAY_LOGIN_LOGIN_PASSWORD` must map to
/// `login.login_password`. Text keys are skipped here and merged by
/// [`with_env_overrides`] so they are never coerced to numbers.
fn env_provider() -> Env {
    Env::prefixed("RELAY_").filter_map(|key| {
        let path = env_key_to_path(key.as_str())?;
        if TEXT_KEYS.contains(&path.as_str()) {
            return None;
        }
        Some(path.into())
    })
}

/// Map a prefix-stripped variable name onto a dotted config path.
///
/// Returns `None` when the name does not start with a known section.
fn env_key_to_path(key: &str) -> Option<String> {
    let key = key.to_ascii_lowercase();
    SECTIONS.iter().find_map(|section| {
        key.strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|rest| !rest.is_empty())
            .map(|rest| format!("{section}.{rest}"))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(RelayConfig::default()))
    }

    fn extract_with(vars: &[(&str, &str)]) -> RelayConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        with_env_overrides(defaults(), |name| map.get(name).cloned())
            .extract()
            .unwrap()
    }

    #[test]
    fn section_mapping_keeps_underscored_keys() {
        assert_eq!(
            env_key_to_path("LOGIN_LOGIN_PASSWORD").as_deref(),
            Some("login.login_password")
        );
        assert_eq!(
            env_key_to_path("BRIDGE_DEFAULT_LIMIT").as_deref(),
            Some("bridge.default_limit")
        );
        assert_eq!(env_key_to_path("LOG_LEVEL").as_deref(), Some("log.level"));
        assert_eq!(env_key_to_path("LOGIN_CODE").as_deref(), Some("login.code"));
    }

    #[test]
    fn section_mapping_rejects_unknown_sections() {
        assert_eq!(env_key_to_path("AGENT_NAME"), None);
        assert_eq!(env_key_to_path("BRIDGE"), None);
        assert_eq!(env_key_to_path("BRIDGE_"), None);
    }

    #[test]
    fn service_variables_populate_config() {
        let config = extract_with(&[
            ("TELEGRAM_API_ID", "12345"),
            ("TELEGRAM_API_HASH", "0123456789"),
            ("TELEGRAM_PHONE", "+15550001111"),
            ("TELEGRAM_BRIDGE_PORT", "9001"),
            ("TRANSCRIPT_HOST", "0.0.0.0"),
        ]);
        assert_eq!(config.telegram.api_id, Some(12345));
        assert_eq!(config.telegram.api_hash.as_deref(), Some("0123456789"));
        assert_eq!(config.telegram.phone.as_deref(), Some("+15550001111"));
        assert_eq!(config.bridge.port, 9001);
        assert_eq!(config.transcript.host, "0.0.0.0");
    }

    #[test]
    fn login_code_keeps_leading_zero() {
        let config = extract_with(&[("TELEGRAM_LOGIN_CODE", "01234")]);
        assert_eq!(config.login.code.as_deref(), Some("01234"));
    }

    #[test]
    fn empty_service_variable_is_ignored() {
        let config = extract_with(&[("TELEGRAM_PASSWORD", ""), ("TELEGRAM_LOGIN_PASSWORD", "pw")]);
        assert!(config.login.password.is_none());
        assert_eq!(config.login.login_password.as_deref(), Some("pw"));
    }

    #[test]
    fn service_variable_wins_over_prefixed() {
        let config = extract_with(&[
            ("RELAY_TELEGRAM_PHONE", "+1000"),
            ("TELEGRAM_PHONE", "+2000"),
        ]);
        assert_eq!(config.telegram.phone.as_deref(), Some("+2000"));
    }

    #[test]
    fn prefixed_text_key_is_merged_verbatim() {
        let config = extract_with(&[("RELAY_LOGIN_CODE", "00042")]);
        assert_eq!(config.login.code.as_deref(), Some("00042"));
    }

    #[test]
    fn non_numeric_port_fails_extraction() {
        let map: HashMap<&str, &str> = [("TRANSCRIPT_PORT", "eighty")].into_iter().collect();
        let result: Result<RelayConfig, _> =
            with_env_overrides(defaults(), |name| map.get(name).map(|v| v.to_string())).extract();
        assert!(result.is_err());
    }
}
