// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync queue: the durable record of pending mutations.
//!
//! The whole queue is a single JSON array document and is rewritten on every
//! mutation. At most one entry exists per `(kind, entity_id)`; a new enqueue
//! replaces the old entry and moves it to the back. Entries stay queued until
//! the remote confirms them, so a crash at any point leaves them for the next
//! drain. The in-memory queue only changes once the new document is written.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use us_core::store::{read_document, write_document};
use us_core::{EntityKind, KvStore, QueueEntry, Record, SyncAction};

/// Store key of the queue document.
pub const QUEUE_KEY: &str = "sync_queue";

/// Result type for queue operations.
pub type QueueResult<T> = us_core::Result<T>;

/// Pending entry counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PendingCounts {
    pub player: usize,
    pub team: usize,
    pub game: usize,
    pub unknown: usize,
}

impl PendingCounts {
    pub fn get(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Player => self.player,
            EntityKind::Team => self.team,
            EntityKind::Game => self.game,
            EntityKind::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.player + self.team + self.game + self.unknown
    }

    fn bump(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Player => self.player += 1,
            EntityKind::Team => self.team += 1,
            EntityKind::Game => self.game += 1,
            EntityKind::Unknown => self.unknown += 1,
        }
    }
}

/// Ordered, deduplicated queue of pending mutations.
pub struct SyncQueue {
    store: Arc<dyn KvStore>,
    entries: Vec<QueueEntry>,
    next_revision: u64,
}

impl SyncQueue {
    /// Loads the persisted queue, or starts empty.
    pub fn load(store: Arc<dyn KvStore>) -> QueueResult<Self> {
        let entries: Vec<QueueEntry> = read_document(store.as_ref(), QUEUE_KEY)?;
        let next_revision = entries.iter().map(|e| e.revision).max().map_or(0, |r| r + 1);
        Ok(SyncQueue {
            store,
            entries,
            next_revision,
        })
    }

    /// Replaces any entry for `(kind, id)` with a fresh one and persists.
    ///
    /// Returns the revision assigned to the new entry.
    pub fn enqueue(
        &mut self,
        kind: EntityKind,
        action: SyncAction,
        id: &str,
        payload: Option<Record>,
        now: DateTime<Utc>,
    ) -> QueueResult<u64> {
        let revision = self.next_revision;
        let mut next: Vec<QueueEntry> = self
            .entries
            .iter()
            .filter(|e| !e.is_for(kind, id))
            .cloned()
            .collect();
        let mut entry = QueueEntry::new(kind, action, id, payload, now);
        entry.revision = revision;
        next.push(entry);
        self.commit(next)?;
        self.next_revision += 1;

        tracing::debug!(%kind, %action, id, revision, "enqueued");
        Ok(revision)
    }

    /// Removes the entry for `(kind, id)`. Returns whether one was removed.
    pub fn dequeue(&mut self, kind: EntityKind, id: &str) -> QueueResult<bool> {
        if !self.has_pending(kind, id) {
            return Ok(false);
        }
        let next = self
            .entries
            .iter()
            .filter(|e| !e.is_for(kind, id))
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Bumps the retry count and records the error on the entry for
    /// `(kind, id)`. The entry stays queued.
    pub fn record_failure(&mut self, kind: EntityKind, id: &str, error: &str) -> QueueResult<bool> {
        let mut next = self.entries.clone();
        let Some(entry) = next.iter_mut().find(|e| e.is_for(kind, id)) else {
            return Ok(false);
        };
        entry.retry_count += 1;
        entry.last_error = Some(error.to_string());
        self.commit(next)?;
        Ok(true)
    }

    /// All entries sorted by kind priority, stable within a kind.
    pub fn drain_order(&self) -> Vec<QueueEntry> {
        let mut ordered = self.entries.clone();
        ordered.sort_by_key(|e| e.kind.priority());
        ordered
    }

    pub fn pending_counts_by_kind(&self) -> PendingCounts {
        let mut counts = PendingCounts::default();
        for entry in &self.entries {
            counts.bump(entry.kind);
        }
        counts
    }

    pub fn has_pending(&self, kind: EntityKind, id: &str) -> bool {
        self.entries.iter().any(|e| e.is_for(kind, id))
    }

    /// The pending entry for `(kind, id)`, if any.
    pub fn get(&self, kind: EntityKind, id: &str) -> Option<&QueueEntry> {
        self.entries.iter().find(|e| e.is_for(kind, id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persists `next` and only then makes it the live queue, so a failed
    /// write leaves memory matching disk.
    fn commit(&mut self, next: Vec<QueueEntry>) -> QueueResult<()> {
        write_document(self.store.as_ref(), QUEUE_KEY, &next)?;
        self.entries = next;
        Ok(())
    }
}
