// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde attributes cannot express: bind hosts, limits,
//! timeouts, and the credentials `relay bridge` needs before it starts.

use crate::diagnostic::ConfigError;
use crate::model::RelayConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns every collected error rather than failing on the first one.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    check_bind_host(&mut errors, "bridge.host", &config.bridge.host);
    check_bind_host(&mut errors, "transcript.host", &config.transcript.host);

    if config.bridge.default_limit < 1 {
        errors.push(ConfigError::Validation {
            message: "bridge.default_limit must be at least 1, got 0".to_string(),
        });
    }

    for (key, secs) in [
        ("transcript.request_timeout_secs", config.transcript.request_timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be greater than 0"),
            });
        }
    }

    if let Some(dir) = &config.session.dir {
        if dir.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "session.dir must not be empty when set".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check the settings `relay bridge` cannot start without.
///
/// Kept apart from [`validate_config`] so the transcript service runs without
/// messaging credentials.
pub fn validate_bridge_credentials(config: &RelayConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let telegram = &config.telegram;

    match telegram.api_id {
        None => errors.push(missing("telegram.api_id", "TELEGRAM_API_ID")),
        Some(id) if id <= 0 => errors.push(ConfigError::Validation {
            message: format!("telegram.api_id must be a positive integer, got {id}"),
        }),
        Some(_) => {}
    }
    if is_blank(telegram.api_hash.as_deref()) {
        errors.push(missing("telegram.api_hash", "TELEGRAM_API_HASH"));
    }
    if is_blank(telegram.phone.as_deref()) {
        errors.push(missing("telegram.phone", "TELEGRAM_PHONE"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn missing(key: &str, env_var: &str) -> ConfigError {
    ConfigError::MissingKey {
        key: key.to_string(),
        env_var: env_var.to_string(),
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_bind_host(errors: &mut Vec<ConfigError>, key: &str, host: &str) {
    let host = host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: format!("{key} must not be empty"),
        });
        return;
    }
    let is_ip = host.parse::<std::net::IpAddr>().is_ok();
    let is_hostname = host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
    if !is_ip && !is_hostname {
        errors.push(ConfigError::Validation {
            message: format!("{key} `{host}` is not a valid IP address or hostname"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_validation(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn zero_default_limit_fails_validation() {
        let mut config = RelayConfig::default();
        config.bridge.default_limit = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_validation(&errors, "bridge.default_limit"));
    }

    #[test]
    fn bad_bind_host_fails_validation() {
        let mut config = RelayConfig::default();
        config.bridge.host = "not a host!".to_string();
        config.transcript.host = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_validation(&errors, "bridge.host"));
        assert!(has_validation(&errors, "transcript.host must not be empty"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = RelayConfig::default();
        config.bridge.default_limit = 0;
        config.transcript.request_timeout_secs = 0;
        config.session.dir = Some(" ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn missing_credentials_name_their_env_vars() {
        let errors = validate_bridge_credentials(&RelayConfig::default()).unwrap_err();
        let vars: Vec<&str> = errors
            .iter()
            .filter_map(|e| match e {
                ConfigError::MissingKey { env_var, .. } => Some(env_var.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            vars,
            vec!["TELEGRAM_API_ID", "TELEGRAM_API_HASH", "TELEGRAM_PHONE"]
        );
    }

    #[test]
    fn non_positive_api_id_is_rejected() {
        let mut config = RelayConfig::default();
        config.telegram.api_id = Some(0);
        config.telegram.api_hash = Some("hash".into());
        config.telegram.phone = Some("+1555".into());
        let errors = validate_bridge_credentials(&config).unwrap_err();
        assert!(has_validation(&errors, "positive integer"));
    }

    #[test]
    fn complete_credentials_pass() {
        let mut config = RelayConfig::default();
        config.telegram.api_id = Some(42);
        config.telegram.api_hash = Some("hash".into());
        config.telegram.phone = Some("+1555".into());
        assert!(validate_bridge_credentials(&config).is_ok());
    }
}
