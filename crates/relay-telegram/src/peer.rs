// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Peer identifiers as accepted by the bridge.

use relay_core::types::PeerKind;

/// Offset applied to channel ids in their marked form.
const CHANNEL_MARK: i64 = 1_000_000_000_000;

/// What a caller-supplied peer string refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerQuery<'a> {
    /// A numeric entity id, bare or marked.
    Id(i64),
    /// A public username, without the leading `@`.
    Username(&'a str),
}

impl<'a> PeerQuery<'a> {
    /// Parse `raw`. Accepts numeric ids, `@name`, `name` and `t.me/name` links.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if !raw.starts_with('+') {
            if let Ok(id) = raw.parse::<i64>() {
                return Some(PeerQuery::Id(id));
            }
        }
        let name = raw
            .strip_prefix("https://t.me/")
            .or_else(|| raw.strip_prefix("t.me/"))
            .unwrap_or(raw);
        let name = name.strip_prefix('@').unwrap_or(name);
        if name.is_empty() {
            None
        } else {
            Some(PeerQuery::Username(name))
        }
    }
}

/// The signed form of an entity id: users as-is, basic groups negated,
/// channels and supergroups as `-100…` ids.
pub fn marked_id(kind: PeerKind, id: i64) -> i64 {
    match kind {
        PeerKind::User => id,
        PeerKind::Group => -id,
        PeerKind::Channel => -(CHANNEL_MARK + id),
    }
}

/// Whether `wanted` names the entity `(kind, id)` in bare or marked form.
pub fn matches_id(kind: PeerKind, id: i64, wanted: i64) -> bool {
    wanted == id || wanted == marked_id(kind, id)
}
