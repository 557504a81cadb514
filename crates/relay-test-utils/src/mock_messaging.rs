// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging account for deterministic testing.
//!
//! `MockMessagingClient` implements `MessagingClient` with scripted per-peer
//! history, a scripted login flow, and per-operation call counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;

use relay_core::types::{LoginCodeToken, PeerKind, SignInOutcome};
use relay_core::{MessagingClient, RelayError, RemoteMessage, ResolvedPeer};

/// Phone code hash handed out by [`MockMessagingClient::request_login_code`].
pub const MOCK_PHONE_CODE_HASH: &str = "mock-phone-code-hash";

/// How the mock answers a submitted login code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInScript {
    /// Accept the code and authorize.
    Authorize,
    /// Accept the code, then demand a second-factor password.
    RequirePassword,
    /// Reject the code with the given message.
    Reject(String),
}

/// Snapshot of how often each client operation was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub is_authorized: usize,
    pub request_login_code: usize,
    pub sign_in: usize,
    pub check_password: usize,
    pub resolve_peer: usize,
    pub recent_messages: usize,
    pub send_message: usize,
}

#[derive(Default)]
struct Counters {
    is_authorized: AtomicUsize,
    request_login_code: AtomicUsize,
    sign_in: AtomicUsize,
    check_password: AtomicUsize,
    resolve_peer: AtomicUsize,
    recent_messages: AtomicUsize,
    send_message: AtomicUsize,
}

struct State {
    authorized: bool,
    sign_in: SignInScript,
    password: Option<String>,
    /// Peer identifier to resolved entity.
    peers: HashMap<String, ResolvedPeer>,
    /// Messages per entity id, oldest first.
    history: HashMap<i64, Vec<RemoteMessage>>,
    unresolvable: HashMap<String, String>,
    history_failure: Option<String>,
    send_failure: Option<String>,
    submitted_codes: Vec<String>,
    sent: Vec<(String, String)>,
}

/// A scripted messaging account for testing.
pub struct MockMessagingClient {
    state: Mutex<State>,
    counters: Counters,
    history_delay: Duration,
}

impl MockMessagingClient {
    /// Create an authorized account with no peers and no history.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                authorized: true,
                sign_in: SignInScript::Authorize,
                password: None,
                peers: HashMap::new(),
                history: HashMap::new(),
                unresolvable: HashMap::new(),
                history_failure: None,
                send_failure: None,
                submitted_codes: Vec::new(),
                sent: Vec::new(),
            }),
            counters: Counters::default(),
            history_delay: Duration::ZERO,
        }
    }

    /// Start from an unauthorized session.
    pub fn unauthorized(mut self) -> Self {
        self.state.get_mut().authorized = false;
        self
    }

    /// Script the answer to `sign_in`.
    pub fn with_sign_in(mut self, script: SignInScript) -> Self {
        self.state.get_mut().sign_in = script;
        self
    }

    /// Only this second-factor password is accepted.
    pub fn with_password(mut self, password: &str) -> Self {
        self.state.get_mut().password = Some(password.to_string());
        self
    }

    /// Seed the history of `peer` with messages given oldest first.
    ///
    /// Each tuple is `(id, text, outgoing)`.
    pub fn with_history(mut self, peer: &str, messages: &[(i64, &str, bool)]) -> Self {
        let state = self.state.get_mut();
        let resolved = resolve_or_insert(state, peer);
        let entries = state.history.entry(resolved.id).or_default();
        entries.extend(messages.iter().map(|(id, text, outgoing)| RemoteMessage {
            id: *id,
            text: (!text.is_empty()).then(|| text.to_string()),
            outgoing: *outgoing,
            date: Utc.timestamp_opt(1_700_000_000 + id, 0).single(),
        }));
        entries.sort_by_key(|m| m.id);
        self
    }

    /// Make `resolve_peer(peer)` fail with `message`.
    pub fn with_unresolvable(mut self, peer: &str, message: &str) -> Self {
        self.state
            .get_mut()
            .unresolvable
            .insert(peer.to_string(), message.to_string());
        self
    }

    /// Make every history fetch fail with `message`.
    pub fn with_history_failure(mut self, message: &str) -> Self {
        self.state.get_mut().history_failure = Some(message.to_string());
        self
    }

    /// Make every send fail with `message`.
    pub fn with_send_failure(mut self, message: &str) -> Self {
        self.state.get_mut().send_failure = Some(message.to_string());
        self
    }

    /// Sleep this long inside every history fetch.
    pub fn with_history_delay(mut self, delay: Duration) -> Self {
        self.history_delay = delay;
        self
    }

    /// Append a message to the history of `peer` after construction.
    pub async fn push_message(&self, peer: &str, id: i64, text: &str, outgoing: bool) {
        let mut state = self.state.lock().await;
        let resolved = resolve_or_insert(&mut state, peer);
        state.history.entry(resolved.id).or_default().push(RemoteMessage {
            id,
            text: Some(text.to_string()),
            outgoing,
            date: None,
        });
    }

    /// Whether the account is currently authorized.
    pub async fn is_logged_in(&self) -> bool {
        self.state.lock().await.authorized
    }

    /// Codes passed to `sign_in`, in call order.
    pub async fn submitted_codes(&self) -> Vec<String> {
        self.state.lock().await.submitted_codes.clone()
    }

    /// `(peer, text)` pairs passed to `send_message`, in call order.
    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.state.lock().await.sent.clone()
    }

    /// Snapshot of the per-operation call counters.
    pub fn calls(&self) -> CallCounts {
        let c = &self.counters;
        CallCounts {
            is_authorized: c.is_authorized.load(Ordering::SeqCst),
            request_login_code: c.request_login_code.load(Ordering::SeqCst),
            sign_in: c.sign_in.load(Ordering::SeqCst),
            check_password: c.check_password.load(Ordering::SeqCst),
            resolve_peer: c.resolve_peer.load(Ordering::SeqCst),
            recent_messages: c.recent_messages.load(Ordering::SeqCst),
            send_message: c.send_message.load(Ordering::SeqCst),
        }
    }
}

impl Default for MockMessagingClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `peer` to a stable entity, allocating an id on first sight.
///
/// Numeric identifiers keep their value as the entity id.
fn resolve_or_insert(state: &mut State, peer: &str) -> ResolvedPeer {
    let next_id = 1_000 + state.peers.len() as i64;
    state
        .peers
        .entry(peer.to_string())
        .or_insert_with(|| ResolvedPeer {
            id: peer.parse().unwrap_or(next_id),
            kind: PeerKind::User,
            access_hash: None,
        })
        .clone()
}

fn peer_name(state: &State, peer: &ResolvedPeer) -> String {
    state
        .peers
        .iter()
        .find(|(_, p)| p.id == peer.id)
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| peer.id.to_string())
}

#[async_trait]
impl MessagingClient for MockMessagingClient {
    async fn is_authorized(&self) -> Result<bool, RelayError> {
        self.counters.is_authorized.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().await.authorized)
    }

    async fn request_login_code(&self, _phone: &str) -> Result<LoginCodeToken, RelayError> {
        self.counters.request_login_code.fetch_add(1, Ordering::SeqCst);
        Ok(LoginCodeToken {
            phone_code_hash: MOCK_PHONE_CODE_HASH.to_string(),
        })
    }

    async fn sign_in(
        &self,
        _phone: &str,
        token: &LoginCodeToken,
        code: &str,
    ) -> Result<SignInOutcome, RelayError> {
        self.counters.sign_in.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        state.submitted_codes.push(code.to_string());
        if token.phone_code_hash != MOCK_PHONE_CODE_HASH {
            return Err(RelayError::Auth {
                message: "PHONE_CODE_HASH_INVALID".into(),
                source: None,
            });
        }
        match state.sign_in.clone() {
            SignInScript::Authorize => {
                state.authorized = true;
                Ok(SignInOutcome::Authorized)
            }
            SignInScript::RequirePassword => Ok(SignInOutcome::PasswordRequired),
            SignInScript::Reject(message) => Err(RelayError::Auth {
                message,
                source: None,
            }),
        }
    }

    async fn check_password(&self, password: &SecretString) -> Result<(), RelayError> {
        self.counters.check_password.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        match &state.password {
            Some(expected) if expected.as_str() == password.expose_secret() => {
                state.authorized = true;
                Ok(())
            }
            _ => Err(RelayError::Auth {
                message: "PASSWORD_HASH_INVALID".into(),
                source: None,
            }),
        }
    }

    async fn resolve_peer(&self, peer: &str) -> Result<ResolvedPeer, RelayError> {
        self.counters.resolve_peer.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        if let Some(message) = state.unresolvable.get(peer) {
            return Err(RelayError::upstream_message(message.clone()));
        }
        Ok(resolve_or_insert(&mut state, peer))
    }

    async fn recent_messages(
        &self,
        peer: &ResolvedPeer,
        limit: u32,
    ) -> Result<Vec<RemoteMessage>, RelayError> {
        self.counters.recent_messages.fetch_add(1, Ordering::SeqCst);
        if !self.history_delay.is_zero() {
            tokio::time::sleep(self.history_delay).await;
        }
        let state = self.state.lock().await;
        if let Some(message) = &state.history_failure {
            return Err(RelayError::upstream_message(message.clone()));
        }
        let messages = state
            .history
            .get(&peer.id)
            .map(|h| h.iter().rev().take(limit as usize).cloned().collect())
            .unwrap_or_default();
        Ok(messages)
    }

    async fn send_message(
        &self,
        peer: &ResolvedPeer,
        text: &str,
    ) -> Result<RemoteMessage, RelayError> {
        self.counters.send_message.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        if let Some(message) = &state.send_failure {
            return Err(RelayError::upstream_message(message.clone()));
        }
        let name = peer_name(&state, peer);
        state.sent.push((name, text.to_string()));

        let history = state.history.entry(peer.id).or_default();
        let id = history.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let message = RemoteMessage {
            id,
            text: Some(text.to_string()),
            outgoing: true,
            date: Utc.timestamp_opt(1_700_000_000 + id, 0).single(),
        };
        history.push(message.clone());
        Ok(message)
    }
}
