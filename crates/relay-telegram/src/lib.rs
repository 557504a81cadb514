// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram user-account client for the Relay bridge.
//!
//! Implements [`MessagingClient`] on `grammers-client`, an MTProto client.
//! The session file is loaded on connect and written back after login and
//! on shutdown.

pub mod peer;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use grammers_client::types::{Chat, LoginToken, PasswordToken};
use grammers_client::{Client, Config, InitParams, SignInError};
use grammers_session::{PackedChat, Session};
use relay_core::types::{LoginCodeToken, PeerKind, SignInOutcome};
use relay_core::{MessagingClient, RelayError, RemoteMessage, ResolvedPeer};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::{debug, info};

use peer::PeerQuery;

fn upstream(err: impl Display) -> RelayError {
    RelayError::upstream_message(err.to_string())
}

fn auth(message: impl Display) -> RelayError {
    RelayError::Auth {
        message: message.to_string(),
        source: None,
    }
}

fn kind_of(chat: &Chat) -> PeerKind {
    match chat {
        Chat::User(_) => PeerKind::User,
        Chat::Group(_) => PeerKind::Group,
        Chat::Channel(_) => PeerKind::Channel,
    }
}

/// Build a [`RemoteMessage`] from raw message fields. Empty text is absent.
fn remote_message(id: i64, text: &str, outgoing: bool, timestamp: i64) -> RemoteMessage {
    RemoteMessage {
        id,
        text: Some(text.to_string()).filter(|t| !t.is_empty()),
        outgoing,
        date: DateTime::<Utc>::from_timestamp(timestamp, 0),
    }
}

/// A connected Telegram user account.
pub struct TelegramAccountClient {
    client: Client,
    session_path: PathBuf,
    pending_code: Mutex<Option<(String, LoginToken)>>,
    pending_password: Mutex<Option<PasswordToken>>,
    chats: DashMap<(PeerKind, i64), PackedChat>,
    next_ticket: AtomicU64,
}

impl TelegramAccountClient {
    /// Load (or create) the session at `session_path` and connect.
    pub async fn connect(
        session_path: &Path,
        api_id: i32,
        api_hash: &SecretString,
    ) -> Result<Self, RelayError> {
        let session =
            Session::load_file_or_create(session_path).map_err(|source| RelayError::Session { source })?;
        let client = Client::connect(Config {
            session,
            api_id,
            api_hash: api_hash.expose_secret().to_string(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| upstream(format!("failed to connect to Telegram: {e}")))?;
        info!(session = %session_path.display(), "connected to Telegram");

        Ok(Self {
            client,
            session_path: session_path.to_path_buf(),
            pending_code: Mutex::new(None),
            pending_password: Mutex::new(None),
            chats: DashMap::new(),
            next_ticket: AtomicU64::new(1),
        })
    }

    /// Write the session back to its file.
    pub fn save_session(&self) -> Result<(), RelayError> {
        self.client
            .session()
            .save_to_file(&self.session_path)
            .map_err(|source| RelayError::Session { source })?;
        debug!(session = %self.session_path.display(), "session saved");
        Ok(())
    }

    fn packed(&self, peer: &ResolvedPeer) -> Result<PackedChat, RelayError> {
        self.chats
            .get(&(peer.kind, peer.id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| upstream(format!("peer {} {} was not resolved", peer.kind, peer.id)))
    }

    /// Find a numeric id among the account's dialogs.
    async fn find_in_dialogs(&self, wanted: i64) -> Result<Option<Chat>, RelayError> {
        let mut dialogs = self.client.iter_dialogs();
        while let Some(dialog) = dialogs.next().await.map_err(upstream)? {
            let chat = dialog.chat();
            if peer::matches_id(kind_of(chat), chat.id(), wanted) {
                return Ok(Some(chat.clone()));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl MessagingClient for TelegramAccountClient {
    async fn is_authorized(&self) -> Result<bool, RelayError> {
        self.client.is_authorized().await.map_err(upstream)
    }

    async fn request_login_code(&self, phone: &str) -> Result<LoginCodeToken, RelayError> {
        let token = self.client.request_login_code(phone).await.map_err(auth)?;
        let ticket = format!("code-{}", self.next_ticket.fetch_add(1, Ordering::SeqCst));
        *self.pending_code.lock().await = Some((ticket.clone(), token));
        Ok(LoginCodeToken {
            phone_code_hash: ticket,
        })
    }

    async fn sign_in(
        &self,
        _phone: &str,
        token: &LoginCodeToken,
        code: &str,
    ) -> Result<SignInOutcome, RelayError> {
        let pending = self.pending_code.lock().await.take();
        let login_token = match pending {
            Some((ticket, login_token)) if ticket == token.phone_code_hash => login_token,
            _ => return Err(auth("no login code was requested for this sign-in")),
        };

        match self.client.sign_in(&login_token, code).await {
            Ok(_) => {
                self.save_session()?;
                Ok(SignInOutcome::Authorized)
            }
            Err(SignInError::PasswordRequired(password_token)) => {
                *self.pending_password.lock().await = Some(password_token);
                Ok(SignInOutcome::PasswordRequired)
            }
            Err(e) => Err(auth(e)),
        }
    }

    async fn check_password(&self, password: &SecretString) -> Result<(), RelayError> {
        let password_token = self
            .pending_password
            .lock()
            .await
            .take()
            .ok_or_else(|| auth("no password was requested"))?;
        self.client
            .check_password(password_token, password.expose_secret())
            .await
            .map_err(auth)?;
        self.save_session()
    }

    async fn resolve_peer(&self, peer: &str) -> Result<ResolvedPeer, RelayError> {
        let not_found = || upstream(format!("Cannot find any entity corresponding to \"{peer}\""));
        let chat = match PeerQuery::parse(peer).ok_or_else(not_found)? {
            PeerQuery::Username(name) => self.client.resolve_username(name).await.map_err(upstream)?,
            PeerQuery::Id(id) => self.find_in_dialogs(id).await?,
        };
        let chat = chat.ok_or_else(not_found)?;

        let resolved = ResolvedPeer {
            id: chat.id(),
            kind: kind_of(&chat),
            access_hash: None,
        };
        self.chats.insert((resolved.kind, resolved.id), chat.pack());
        debug!(peer, kind = %resolved.kind, id = resolved.id, "peer resolved");
        Ok(resolved)
    }

    async fn recent_messages(
        &self,
        peer: &ResolvedPeer,
        limit: u32,
    ) -> Result<Vec<RemoteMessage>, RelayError> {
        let chat = self.packed(peer)?;
        let mut messages = self.client.iter_messages(chat).limit(limit as usize);
        let mut out = Vec::new();
        while let Some(message) = messages.next().await.map_err(upstream)? {
            out.push(remote_message(
                i64::from(message.id()),
                message.text(),
                message.outgoing(),
                message.date().timestamp(),
            ));
        }
        Ok(out)
    }

    async fn send_message(
        &self,
        peer: &ResolvedPeer,
        text: &str,
    ) -> Result<RemoteMessage, RelayError> {
        let chat = self.packed(peer)?;
        let sent = self.client.send_message(chat, text).await.map_err(upstream)?;
        Ok(remote_message(
            i64::from(sent.id()),
            sent.text(),
            true,
            sent.date().timestamp(),
        ))
    }
}
