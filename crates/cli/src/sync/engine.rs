// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync engine instance.
//!
//! [`SyncEngine`] owns the queue, the local cache, the connectivity monitor
//! and the drain trigger, with the store, remote and clock injected. Queue and
//! cache live behind one mutex that is never held across an await, so each
//! facade call and each settled entry is one indivisible step.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Notify;
use us_core::{
    ClockSource, Entity, EntityKind, Game, KvStore, Player, QueueEntry, Record, SyncAction,
    SystemClock, Team,
};

use super::cache::LocalCache;
use super::connectivity::{ConnectivityMonitor, Transition};
use super::error::SyncResult;
use super::facade::EntitySync;
use super::processor::{DrainReport, SyncProcessor};
use super::queue::{PendingCounts, SyncQueue};
use super::remote::Remote;
use super::routes::{Graduation, Route};

/// Engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay before another pass while entries remain.
    pub retry_delay: Duration,
    /// Connectivity assumed until the first signal.
    pub start_online: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            retry_delay: Duration::from_secs(5),
            start_online: false,
        }
    }
}

/// Aggregate sync status.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    pub online: bool,
    pub syncing: bool,
    pub pending: PendingCounts,
    /// Entries the remote has rejected at least once, in drain order.
    pub failing: Vec<QueueEntry>,
}

impl SyncSummary {
    pub fn is_synced(&self) -> bool {
        self.pending.total() == 0
    }
}

/// Queue and cache, mutated together.
pub struct EngineState {
    pub queue: SyncQueue,
    pub cache: LocalCache,
}

impl EngineState {
    /// True if `id` is already used locally for `kind`.
    pub fn knows(&self, kind: EntityKind, id: &str) -> bool {
        self.cache.contains(kind, id) || self.queue.has_pending(kind, id)
    }

    /// True if a delete for `(kind, id)` has not been confirmed yet.
    pub fn delete_pending(&self, kind: EntityKind, id: &str) -> bool {
        self.queue
            .get(kind, id)
            .is_some_and(|e| e.action == SyncAction::Delete)
    }

    /// Writes `record` to the cache and queues `action` for it. If the
    /// enqueue fails the cached record is put back as it was.
    pub fn stage(
        &mut self,
        kind: EntityKind,
        action: SyncAction,
        id: &str,
        record: Record,
        now: DateTime<Utc>,
    ) -> us_core::Result<()> {
        let previous = self.cache.get(kind, id).cloned();
        self.cache.put(kind, id, record.clone())?;
        if let Err(e) = self.queue.enqueue(kind, action, id, Some(record), now) {
            self.restore(kind, id, previous);
            return Err(e);
        }
        Ok(())
    }

    /// Drops the cached record and queues its delete. If the enqueue fails
    /// the record is put back.
    pub fn stage_delete(
        &mut self,
        kind: EntityKind,
        id: &str,
        now: DateTime<Utc>,
    ) -> us_core::Result<()> {
        let previous = self.cache.remove(kind, id)?;
        if let Err(e) = self.queue.enqueue(kind, SyncAction::Delete, id, None, now) {
            self.restore(kind, id, previous);
            return Err(e);
        }
        Ok(())
    }

    fn restore(&mut self, kind: EntityKind, id: &str, previous: Option<Record>) {
        let restored = match previous {
            Some(rec) => self.cache.put(kind, id, rec),
            None => self.cache.remove(kind, id).map(|_| ()),
        };
        if let Err(e) = restored {
            tracing::warn!(%kind, id, error = %e, "could not roll back local record");
        }
    }

    /// Applies a confirmed call: graduates the local record, then removes
    /// the queue entry. Does nothing if the entry was replaced since
    /// dispatch. Returns whether the entry was settled.
    pub fn settle(&mut self, entry: &QueueEntry, route: &Route) -> us_core::Result<bool> {
        if !self.is_current(entry) {
            return Ok(false);
        }
        let (kind, id) = (entry.kind, entry.entity_id.as_str());
        match (entry.action, route.graduation) {
            (SyncAction::Delete, _) | (_, Graduation::Remove) => {
                self.cache.remove(kind, id)?;
            }
            (_, Graduation::ClearMarker) => {
                self.cache.clear_unconfirmed(kind, id)?;
            }
        }
        self.queue.dequeue(kind, id)
    }

    /// Records a rejection on the entry unless it was replaced since
    /// dispatch. Returns whether it was recorded.
    pub fn fail(&mut self, entry: &QueueEntry, error: &str) -> us_core::Result<bool> {
        if !self.is_current(entry) {
            return Ok(false);
        }
        self.queue
            .record_failure(entry.kind, &entry.entity_id, error)
    }

    /// Re-enqueues unconfirmed records that lost their queue entry, e.g. to
    /// a crash between the cache write and the enqueue.
    pub fn requeue_orphans(&mut self, now: DateTime<Utc>) -> us_core::Result<usize> {
        let orphans: Vec<(EntityKind, String)> = self
            .cache
            .unconfirmed_ids()
            .into_iter()
            .filter(|(kind, id)| !self.queue.has_pending(*kind, id))
            .collect();
        for (kind, id) in &orphans {
            let payload = self.cache.get(*kind, id).cloned();
            tracing::warn!(%kind, id = %id, "requeueing orphaned unconfirmed record");
            self.queue
                .enqueue(*kind, SyncAction::Create, id, payload, now)?;
        }
        Ok(orphans.len())
    }

    fn is_current(&self, entry: &QueueEntry) -> bool {
        self.queue
            .get(entry.kind, &entry.entity_id)
            .is_some_and(|e| e.revision == entry.revision)
    }
}

/// Offline-first sync engine.
pub struct SyncEngine {
    state: Mutex<EngineState>,
    connectivity: ConnectivityMonitor,
    remote: Arc<dyn Remote>,
    clock: Arc<dyn ClockSource>,
    processor: SyncProcessor,
    drain: Arc<Notify>,
    retry_delay: Duration,
}

impl SyncEngine {
    /// Loads persisted state from `store` and builds an engine around it.
    pub fn open(
        store: Arc<dyn KvStore>,
        remote: Arc<dyn Remote>,
        config: EngineConfig,
    ) -> SyncResult<Self> {
        let clock: Arc<dyn ClockSource> = Arc::new(SystemClock);
        let mut state = EngineState {
            queue: SyncQueue::load(store.clone())?,
            cache: LocalCache::load(store)?,
        };
        state.requeue_orphans(clock.now())?;

        tracing::debug!(pending = state.queue.len(), "sync engine opened");

        let drain = Arc::new(Notify::new());
        Ok(SyncEngine {
            state: Mutex::new(state),
            connectivity: ConnectivityMonitor::new(config.start_online, drain.clone()),
            remote,
            clock,
            processor: SyncProcessor::new(),
            drain,
            retry_delay: config.retry_delay,
        })
    }

    /// Replaces the clock used for ids and timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn ClockSource>) -> Self {
        self.clock = clock;
        self
    }

    pub fn players(&self) -> EntitySync<'_, Player> {
        self.entities()
    }

    pub fn teams(&self) -> EntitySync<'_, Team> {
        self.entities()
    }

    pub fn games(&self) -> EntitySync<'_, Game> {
        self.entities()
    }

    /// Facade for any entity type, e.g. a caller-defined game type.
    pub fn entities<E: Entity>(&self) -> EntitySync<'_, E> {
        EntitySync::new(self)
    }

    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    /// Records a connectivity signal from the runtime.
    pub fn set_online(&self, online: bool) -> Transition {
        self.connectivity.set_online(online)
    }

    /// Probes the remote and records the result.
    pub async fn probe(&self) -> bool {
        self.connectivity.probe(self.remote.as_ref()).await
    }

    /// Runs one drain pass.
    pub async fn drain(&self) -> SyncResult<DrainReport> {
        self.processor.drain(self).await
    }

    /// Asks the worker for a drain pass if online.
    pub fn request_drain(&self) {
        if self.is_online() {
            self.drain.notify_one();
        }
    }

    /// The signal a worker waits on for drain requests.
    pub fn drain_signal(&self) -> Arc<Notify> {
        self.drain.clone()
    }

    pub fn is_syncing(&self) -> bool {
        self.processor.is_syncing()
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn summary(&self) -> SyncSummary {
        let state = self.lock_state();
        SyncSummary {
            online: self.is_online(),
            syncing: self.is_syncing(),
            pending: state.queue.pending_counts_by_kind(),
            failing: state
                .queue
                .drain_order()
                .into_iter()
                .filter(QueueEntry::has_failed)
                .collect(),
        }
    }

    /// Pending entries in drain order.
    pub fn pending(&self) -> Vec<QueueEntry> {
        self.lock_state().queue.drain_order()
    }

    pub(super) fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn remote(&self) -> &dyn Remote {
        self.remote.as_ref()
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
