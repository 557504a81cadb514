// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup sequences for the two facades.

use std::path::PathBuf;
use std::sync::Arc;

use relay_bridge::session::SESSION_FILE_NAME;
use relay_bridge::{
    AccountCredentials, Authenticator, Bridge, ConsolePrompt, LoginSecrets, SessionStore,
};
use relay_config::RelayConfig;
use relay_core::RelayError;
use relay_gateway::{bridge_router, serve, transcript_router, ServerConfig};
use relay_telegram::TelegramAccountClient;
use relay_transcript::{TranscriptService, YoutubeCaptionSource};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Open the session, log in, and serve the bridge until `cancel` fires.
///
/// Credentials must already have passed `validate_bridge_credentials`.
pub async fn run_bridge(config: &RelayConfig, cancel: CancellationToken) -> Result<(), RelayError> {
    let credentials = AccountCredentials::from_config(&config.telegram)?;
    let session = SessionStore::open(&config.session)?;
    info!(
        session = %session.path().display(),
        existing = session.exists(),
        "using session"
    );

    let client = Arc::new(
        TelegramAccountClient::connect(&session.path(), credentials.api_id, &credentials.api_hash)
            .await?,
    );

    let prompt = ConsolePrompt;
    Authenticator::new(LoginSecrets::from_config(&config.login), &prompt)
        .ensure_logged_in(client.as_ref(), &credentials.phone)
        .await?;
    info!(phone = %credentials.phone, "account ready");

    let bridge = Bridge::new(client.clone()).with_default_limit(config.bridge.default_limit);
    let server = ServerConfig {
        host: config.bridge.host.clone(),
        port: config.bridge.port,
    };
    let served = serve(&server, bridge_router(Arc::new(bridge)), cancel).await;
    client.save_session()?;
    served
}

/// Serve the transcript service until `cancel` fires.
pub async fn run_transcript(
    config: &RelayConfig,
    cancel: CancellationToken,
) -> Result<(), RelayError> {
    let source = YoutubeCaptionSource::new(&config.transcript)?;
    let service = TranscriptService::new(Arc::new(source));
    let server = ServerConfig {
        host: config.transcript.host.clone(),
        port: config.transcript.port,
    };
    serve(&server, transcript_router(Arc::new(service)), cancel).await
}

/// Human-readable summary printed by `relay check-config`.
pub fn describe(config: &RelayConfig, session_dir: &std::path::Path) -> String {
    let bridge = ServerConfig {
        host: config.bridge.host.clone(),
        port: config.bridge.port,
    };
    let transcript = ServerConfig {
        host: config.transcript.host.clone(),
        port: config.transcript.port,
    };
    format!(
        "bridge:     http://{}\ntranscript: http://{}\nsession:    {}",
        bridge.addr(),
        transcript.addr(),
        session_dir.join(SESSION_FILE_NAME).display(),
    )
}

/// Session directory as `relay bridge` would use it, without creating it.
pub fn session_dir(config: &RelayConfig) -> Result<PathBuf, RelayError> {
    match config.session.dir.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => relay_bridge::session::default_session_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_lists_addresses_and_session() {
        let dir = tempfile::tempdir().unwrap();
        let text = describe(&RelayConfig::default(), dir.path());
        assert!(text.contains("http://127.0.0.1:8081"));
        assert!(text.contains("http://127.0.0.1:8000"));
        assert!(text.contains(&dir.path().join("user").display().to_string()));
    }

    #[test]
    fn configured_session_dir_wins() {
        let mut config = RelayConfig::default();
        config.session.dir = Some("/var/lib/relay".into());
        assert_eq!(session_dir(&config).unwrap(), PathBuf::from("/var/lib/relay"));
    }

    #[test]
    fn blank_session_dir_falls_back_to_install_dir() {
        let mut config = RelayConfig::default();
        config.session.dir = Some("  ".into());
        let dir = session_dir(&config).unwrap();
        assert!(dir.ends_with("session"));
    }
}
