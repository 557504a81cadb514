// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account credentials and the on-disk session location.

use std::fmt;
use std::path::{Path, PathBuf};

use relay_config::model::{SessionConfig, TelegramConfig};
use relay_core::RelayError;
use secrecy::SecretString;
use tracing::debug;

/// File name of the session inside the session directory.
pub const SESSION_FILE_NAME: &str = "user";

/// Credentials identifying the application and the account to log in as.
#[derive(Clone)]
pub struct AccountCredentials {
    pub api_id: i32,
    pub api_hash: SecretString,
    pub phone: String,
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("api_id", &self.api_id)
            .field("api_hash", &"[REDACTED]")
            .field("phone", &self.phone)
            .finish()
    }
}

impl AccountCredentials {
    /// Resolve credentials from config, failing on the first missing value.
    pub fn from_config(config: &TelegramConfig) -> Result<Self, RelayError> {
        let api_id = config
            .api_id
            .ok_or_else(|| missing("TELEGRAM_API_ID"))?;
        if api_id <= 0 {
            return Err(RelayError::Config(format!(
                "TELEGRAM_API_ID must be a positive integer, got {api_id}"
            )));
        }
        let api_hash = non_empty(config.api_hash.as_deref()).ok_or_else(|| missing("TELEGRAM_API_HASH"))?;
        let phone = non_empty(config.phone.as_deref()).ok_or_else(|| missing("TELEGRAM_PHONE"))?;

        Ok(Self {
            api_id,
            api_hash: SecretString::from(api_hash.to_string()),
            phone: phone.to_string(),
        })
    }
}

fn missing(var: &str) -> RelayError {
    RelayError::Config(format!("Missing {var}"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Location of the persistent session file.
///
/// The directory is created on open; the file itself is written by the
/// messaging client on first successful login and never deleted here.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Resolve the session directory and make sure it exists.
    pub fn open(config: &SessionConfig) -> Result<Self, RelayError> {
        let dir = match non_empty(config.dir.as_deref()) {
            Some(dir) => PathBuf::from(dir),
            None => default_session_dir()?,
        };
        Self::open_at(dir)
    }

    /// Use `dir` as the session directory, creating it if needed.
    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self, RelayError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| RelayError::Session { source })?;
        debug!(dir = %dir.display(), "session directory ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the session file, `<dir>/user`.
    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE_NAME)
    }

    /// Whether a session has been persisted by an earlier login.
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }
}

/// The `session` directory next to the running executable.
pub fn default_session_dir() -> Result<PathBuf, RelayError> {
    let exe = std::env::current_exe().map_err(|source| RelayError::Session { source })?;
    let install_dir = exe.parent().ok_or_else(|| {
        RelayError::Config(format!(
            "cannot determine installation directory of {}",
            exe.display()
        ))
    })?;
    Ok(install_dir.join("session"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn telegram(api_id: Option<i32>, api_hash: Option<&str>, phone: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            api_id,
            api_hash: api_hash.map(String::from),
            phone: phone.map(String::from),
        }
    }

    #[test]
    fn credentials_resolve_when_complete() {
        let creds =
            AccountCredentials::from_config(&telegram(Some(42), Some("abc"), Some("+1555"))).unwrap();
        assert_eq!(creds.api_id, 42);
        assert_eq!(creds.api_hash.expose_secret(), "abc");
        assert_eq!(creds.phone, "+1555");
    }

    #[test]
    fn missing_values_name_their_variable() {
        let cases = [
            (telegram(None, Some("abc"), Some("+1")), "TELEGRAM_API_ID"),
            (telegram(Some(1), None, Some("+1")), "TELEGRAM_API_HASH"),
            (telegram(Some(1), Some("abc"), Some("")), "TELEGRAM_PHONE"),
        ];
        for (config, var) in cases {
            let err = AccountCredentials::from_config(&config).unwrap_err();
            assert!(
                matches!(&err, RelayError::Config(msg) if msg.contains(var)),
                "expected {var} in {err}"
            );
        }
    }

    #[test]
    fn non_positive_api_id_is_rejected() {
        let err = AccountCredentials::from_config(&telegram(Some(-3), Some("a"), Some("+1"))).unwrap_err();
        assert!(matches!(err, RelayError::Config(msg) if msg.contains("positive")));
    }

    #[test]
    fn debug_redacts_api_hash() {
        let creds =
            AccountCredentials::from_config(&telegram(Some(42), Some("supersecret"), Some("+1"))).unwrap();
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn open_creates_configured_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/session");
        let store = SessionStore::open(&SessionConfig {
            dir: Some(dir.display().to_string()),
        })
        .unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.path(), dir.join("user"));
        assert!(!store.exists());

        std::fs::write(store.path(), b"blob").unwrap();
        assert!(store.exists());
    }

    #[test]
    fn default_dir_sits_next_to_executable() {
        let dir = default_session_dir().unwrap();
        assert_eq!(dir.file_name().unwrap(), "session");
        let exe = std::env::current_exe().unwrap();
        assert_eq!(dir.parent(), exe.parent());
    }
}
