// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync queue entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::{EntityKind, SyncAction};
use crate::record::Record;

/// A pending mutation awaiting remote confirmation.
///
/// At most one entry exists per `(kind, entity_id)`; a newer mutation for the
/// same key replaces the older one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub kind: EntityKind,
    pub action: SyncAction,
    pub entity_id: String,
    /// Record to transmit. `None` for deletes.
    pub payload: Option<Record>,
    pub enqueued_at: DateTime<Utc>,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub last_error: Option<String>,
    /// Queue-wide sequence number assigned at enqueue time. A drain only
    /// settles an entry whose revision is unchanged since it was dispatched.
    #[serde(default)]
    pub revision: u64,
}

impl QueueEntry {
    /// Creates a fresh entry with no retry history.
    pub fn new(
        kind: EntityKind,
        action: SyncAction,
        entity_id: impl Into<String>,
        payload: Option<Record>,
        enqueued_at: DateTime<Utc>,
    ) -> Self {
        QueueEntry {
            kind,
            action,
            entity_id: entity_id.into(),
            payload,
            enqueued_at,
            retry_count: 0,
            last_error: None,
            revision: 0,
        }
    }

    /// Returns true if this entry targets the given entity.
    pub fn is_for(&self, kind: EntityKind, entity_id: &str) -> bool {
        self.kind == kind && self.entity_id == entity_id
    }

    /// Returns true if a previous attempt was rejected by the remote.
    pub fn has_failed(&self) -> bool {
        self.last_error.is_some()
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
