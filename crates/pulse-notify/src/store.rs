//! In-memory notification collection with read/unread state.
//!
//! Ordering is reverse-chronological by arrival into the client: live
//! events are always prepended; the historical block sits behind any
//! live-arrived items (see `apply_bulk` for the merge policy).

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use pulse_core::AlertNotification;
use tracing::debug;

/// Shared handle to the store. Mutation happens behind the lock; there is
/// no cross-lock coordination because every mutator takes the write guard
/// for the full operation.
pub type SharedStore = Arc<RwLock<NotificationStore>>;

/// Notification collection, read-state set and unread counter.
#[derive(Debug, Default)]
pub struct NotificationStore {
    /// Most-recent-first.
    items: Vec<AlertNotification>,
    /// Ids the session has acknowledged.
    read: HashSet<i64>,
    /// Cardinality of items not in `read`.
    unread: usize,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a live push event.
    ///
    /// Returns `false` (and changes nothing) if the id is already present;
    /// a redelivered frame must not duplicate the entry or inflate the
    /// unread count. A fresh event always counts as unread.
    pub fn push_live(&mut self, notification: AlertNotification) -> bool {
        if self.contains(notification.id) {
            debug!(id = notification.id, "Duplicate live notification dropped");
            return false;
        }
        self.unread += 1;
        self.items.insert(0, notification);
        true
    }

    /// Install the historical bulk fetch.
    ///
    /// Merge policy is union by id: items that arrived live before the
    /// fetch completed and are missing from the fetched list are kept,
    /// ahead of the fetched block, in their arrival order. Duplicates
    /// collapse to the already-present entry. The unread count is
    /// recomputed from read-state membership over the merged collection.
    pub fn apply_bulk(&mut self, fetched: Vec<AlertNotification>) {
        let fetched_ids: HashSet<i64> = fetched.iter().map(|n| n.id).collect();

        let mut merged: Vec<AlertNotification> = self
            .items
            .drain(..)
            .filter(|n| !fetched_ids.contains(&n.id))
            .collect();
        merged.extend(fetched);

        self.items = merged;
        self.unread = self
            .items
            .iter()
            .filter(|n| !self.read.contains(&n.id))
            .count();
        debug!(
            total = self.items.len(),
            unread = self.unread,
            "Bulk notification load applied"
        );
    }

    /// Acknowledge one notification. Idempotent: a second call for the
    /// same id never drives the unread count below zero.
    pub fn mark_read(&mut self, id: i64) {
        if self.read.insert(id) {
            self.unread = self.unread.saturating_sub(1);
        }
    }

    /// Acknowledge every currently-known notification atomically with
    /// respect to the current snapshot.
    pub fn mark_all_read(&mut self) {
        let ids: Vec<i64> = self.items.iter().map(|n| n.id).collect();
        self.read.extend(ids);
        self.unread = 0;
    }

    pub fn is_read(&self, id: i64) -> bool {
        self.read.contains(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|n| n.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current collection, most-recent-first.
    pub fn snapshot(&self) -> Vec<AlertNotification> {
        self.items.clone()
    }

    /// Ids in collection order. Cheaper than `snapshot` for assertions.
    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|n| n.id).collect()
    }
}
