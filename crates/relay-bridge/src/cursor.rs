// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-peer delivery cursors.
//!
//! A cursor is the highest message id already delivered for a peer. Entries
//! are created by the first poll that returns items and only ever move up.
//! Cursors live in memory and are lost on restart.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use relay_core::RemoteMessage;

/// Concurrent map of peer to last delivered message id.
#[derive(Debug, Default)]
pub struct CursorTable {
    cursors: DashMap<String, i64>,
}

impl CursorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest id delivered for `peer`, if anything was delivered yet.
    pub fn get(&self, peer: &str) -> Option<i64> {
        self.cursors.get(peer).map(|id| *id)
    }

    /// Move the cursor of `peer` up to `id`. Lower ids are ignored.
    pub fn advance(&self, peer: &str, id: i64) {
        self.cursors
            .entry(peer.to_string())
            .and_modify(|current| *current = (*current).max(id))
            .or_insert(id);
    }

    /// Select the items of `peer` that are new and record their delivery.
    ///
    /// `items` must be in chronological order. The lower bound is `after_id`
    /// when given, else the stored cursor (0 when none). Kept items are those
    /// above the bound; when any are kept the cursor advances to the largest
    /// kept id, never below its current value. Bound selection, filtering and
    /// the advance all happen under the entry lock of `peer`, so two concurrent
    /// deliveries never both hand out the same id from the stored cursor.
    pub fn deliver(
        &self,
        peer: &str,
        after_id: Option<i64>,
        items: Vec<RemoteMessage>,
    ) -> Vec<RemoteMessage> {
        match self.cursors.entry(peer.to_string()) {
            Entry::Occupied(mut slot) => {
                let current = *slot.get();
                let kept = keep_after(items, after_id.unwrap_or(current));
                if let Some(max) = max_id(&kept) {
                    if max > current {
                        *slot.get_mut() = max;
                    }
                }
                kept
            }
            Entry::Vacant(slot) => {
                let kept = keep_after(items, after_id.unwrap_or(0));
                if let Some(max) = max_id(&kept) {
                    slot.insert(max);
                }
                kept
            }
        }
    }

    /// Number of peers with a cursor.
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}

fn keep_after(items: Vec<RemoteMessage>, lower_bound: i64) -> Vec<RemoteMessage> {
    items.into_iter().filter(|m| m.id > lower_bound).collect()
}

fn max_id(items: &[RemoteMessage]) -> Option<i64> {
    items.iter().map(|m| m.id).max()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn msgs(ids: &[i64]) -> Vec<RemoteMessage> {
        ids.iter()
            .map(|&id| RemoteMessage {
                id,
                text: Some(format!("m{id}")),
                outgoing: false,
                date: None,
            })
            .collect()
    }

    fn ids(items: &[RemoteMessage]) -> Vec<i64> {
        items.iter().map(|m| m.id).collect()
    }

    #[test]
    fn first_delivery_creates_cursor() {
        let table = CursorTable::new();
        let kept = table.deliver("p", None, msgs(&[1, 2, 3]));
        assert_eq!(ids(&kept), vec![1, 2, 3]);
        assert_eq!(table.get("p"), Some(3));
    }

    #[test]
    fn empty_delivery_creates_no_entry() {
        let table = CursorTable::new();
        assert!(table.deliver("p", None, Vec::new()).is_empty());
        assert_eq!(table.get("p"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn stored_cursor_filters_seen_items() {
        let table = CursorTable::new();
        table.deliver("p", None, msgs(&[1, 2]));
        let kept = table.deliver("p", None, msgs(&[1, 2, 3]));
        assert_eq!(ids(&kept), vec![3]);
        assert_eq!(table.get("p"), Some(3));
    }

    #[test]
    fn nothing_new_leaves_cursor_alone() {
        let table = CursorTable::new();
        table.deliver("p", None, msgs(&[4]));
        assert!(table.deliver("p", None, msgs(&[2, 4])).is_empty());
        assert_eq!(table.get("p"), Some(4));
    }

    #[test]
    fn explicit_after_id_overrides_bound_but_never_regresses() {
        let table = CursorTable::new();
        table.deliver("p", None, msgs(&[5, 6, 7]));

        let kept = table.deliver("p", Some(5), msgs(&[5, 6, 7]));
        assert_eq!(ids(&kept), vec![6, 7]);
        assert_eq!(table.get("p"), Some(7));

        let kept = table.deliver("p", Some(0), msgs(&[1, 2]));
        assert_eq!(ids(&kept), vec![1, 2]);
        assert_eq!(table.get("p"), Some(7));
    }

    #[test]
    fn explicit_after_id_advances_cursor() {
        let table = CursorTable::new();
        let kept = table.deliver("p", Some(1), msgs(&[1, 2, 3]));
        assert_eq!(ids(&kept), vec![2, 3]);
        assert_eq!(table.get("p"), Some(3));
    }

    #[test]
    fn peers_are_independent() {
        let table = CursorTable::new();
        table.deliver("a", None, msgs(&[10]));
        table.deliver("b", None, msgs(&[3]));
        assert_eq!(table.get("a"), Some(10));
        assert_eq!(table.get("b"), Some(3));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn advance_is_monotonic() {
        let table = CursorTable::new();
        table.advance("p", 9);
        table.advance("p", 4);
        assert_eq!(table.get("p"), Some(9));
        table.advance("p", 12);
        assert_eq!(table.get("p"), Some(12));
    }

    #[test]
    fn concurrent_deliveries_never_duplicate() {
        let table = Arc::new(CursorTable::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || table.deliver("p", None, msgs(&[1, 2, 3, 4, 5])))
            })
            .collect();

        let mut delivered: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| ids(&h.join().unwrap()))
            .collect();
        delivered.sort_unstable();
        assert_eq!(delivered, vec![1, 2, 3, 4, 5]);
        assert_eq!(table.get("p"), Some(5));
    }
}
