// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client trait for the messaging account behind the bridge.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::RelayError;
use crate::types::{LoginCodeToken, RemoteMessage, ResolvedPeer, SignInOutcome};

/// Connection to one messaging account.
///
/// The bridge shares a single client across all requests, so implementations
/// must be safe to call concurrently.
#[async_trait]
pub trait MessagingClient: Send + Sync + 'static {
    /// Whether the loaded session already represents an authorized account.
    async fn is_authorized(&self) -> Result<bool, RelayError>;

    /// Asks the network to send a one-time login code to `phone`.
    async fn request_login_code(&self, phone: &str) -> Result<LoginCodeToken, RelayError>;

    /// Submits a login code previously requested with [`Self::request_login_code`].
    async fn sign_in(
        &self,
        phone: &str,
        token: &LoginCodeToken,
        code: &str,
    ) -> Result<SignInOutcome, RelayError>;

    /// Submits the second-factor password after [`SignInOutcome::PasswordRequired`].
    async fn check_password(&self, password: &SecretString) -> Result<(), RelayError>;

    /// Resolves a caller-supplied peer identifier into an addressable entity.
    async fn resolve_peer(&self, peer: &str) -> Result<ResolvedPeer, RelayError>;

    /// Returns up to `limit` of the most recent messages, newest first.
    async fn recent_messages(
        &self,
        peer: &ResolvedPeer,
        limit: u32,
    ) -> Result<Vec<RemoteMessage>, RelayError>;

    /// Sends `text` to `peer` and returns the message the network created.
    async fn send_message(
        &self,
        peer: &ResolvedPeer,
        text: &str,
    ) -> Result<RemoteMessage, RelayError>;
}
