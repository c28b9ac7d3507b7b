// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync processor: the single-flight drain pass.
//!
//! A pass walks the queue in drain order, one entry at a time. A connectivity
//! failure marks the engine offline and ends the pass; a rejection is recorded
//! on its entry and the pass moves on.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use us_core::SyncAction;

use super::engine::SyncEngine;
use super::error::SyncResult;
use super::remote::RemoteError;
use super::routes::route_for;

/// Why a pass did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InFlight,
    Empty,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum DrainOutcome {
    Skipped(SkipReason),
    /// Every entry was attempted.
    Completed,
    /// Connectivity was lost part way through.
    Aborted,
}

/// Result of one drain pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    #[serde(flatten)]
    pub outcome: DrainOutcome,
    /// Entries confirmed and removed.
    pub confirmed: usize,
    /// Entries the remote rejected.
    pub rejected: usize,
    /// Entries replaced by a newer mutation while in flight.
    pub superseded: usize,
    /// Entries still queued after the pass.
    pub remaining: usize,
}

impl DrainReport {
    fn new(outcome: DrainOutcome, remaining: usize) -> Self {
        DrainReport {
            outcome,
            confirmed: 0,
            rejected: 0,
            superseded: 0,
            remaining,
        }
    }

    /// True if another pass should follow after the retry delay.
    pub fn needs_retry(&self, online: bool) -> bool {
        online && self.remaining > 0 && self.outcome != DrainOutcome::Skipped(SkipReason::InFlight)
    }
}

/// Clears the in-flight flag when the pass ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives queued entries to the remote.
#[derive(Debug, Default)]
pub struct SyncProcessor {
    syncing: AtomicBool,
}

impl SyncProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }

    /// Runs one pass over `engine`'s queue.
    pub async fn drain(&self, engine: &SyncEngine) -> SyncResult<DrainReport> {
        if self
            .syncing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            let remaining = engine.lock_state().queue.len();
            return Ok(DrainReport::new(
                DrainOutcome::Skipped(SkipReason::InFlight),
                remaining,
            ));
        }
        let _in_flight = InFlight(&self.syncing);

        let entries = engine.lock_state().queue.drain_order();
        if entries.is_empty() {
            return Ok(DrainReport::new(DrainOutcome::Skipped(SkipReason::Empty), 0));
        }
        if !engine.is_online() {
            return Ok(DrainReport::new(
                DrainOutcome::Skipped(SkipReason::Offline),
                entries.len(),
            ));
        }

        tracing::info!(entries = entries.len(), "drain started");
        let mut report = DrainReport::new(DrainOutcome::Completed, 0);

        for entry in entries {
            let Some(route) = route_for(entry.kind) else {
                tracing::warn!(id = %entry.entity_id, "no route for entity kind");
                if engine.lock_state().fail(&entry, "unknown entity kind")? {
                    report.rejected += 1;
                }
                continue;
            };

            let request = route.request_for(&entry);
            tracing::debug!(
                kind = %entry.kind,
                action = %entry.action,
                id = %entry.entity_id,
                %request,
                "dispatching"
            );
            let outcome = engine.remote().call(request).await;

            match outcome {
                Err(e) if e.is_connectivity() => {
                    tracing::warn!(error = %e, id = %entry.entity_id, "remote unreachable, aborting drain");
                    engine.connectivity().set_online(false);
                    report.outcome = DrainOutcome::Aborted;
                    break;
                }
                Err(e) if !e.was_accepted()
                    && !(entry.action == SyncAction::Delete && e.is_not_found()) =>
                {
                    tracing::warn!(
                        kind = %entry.kind,
                        id = %entry.entity_id,
                        error = %e,
                        "remote rejected entry"
                    );
                    if engine.lock_state().fail(&entry, &failure_message(&e))? {
                        report.rejected += 1;
                    } else {
                        report.superseded += 1;
                    }
                }
                // Success whatever the body, or a delete of something the
                // remote no longer has.
                _ => {
                    if engine.lock_state().settle(&entry, route)? {
                        report.confirmed += 1;
                    } else {
                        report.superseded += 1;
                    }
                }
            }
        }

        report.remaining = engine.lock_state().queue.len();
        tracing::info!(
            outcome = ?report.outcome,
            confirmed = report.confirmed,
            rejected = report.rejected,
            remaining = report.remaining,
            "drain finished"
        );
        Ok(report)
    }
}

/// Message kept in `last_error`: the remote's detail for rejections.
fn failure_message(error: &RemoteError) -> String {
    match error {
        RemoteError::Rejected { detail, .. } => detail.clone(),
        other => other.to_string(),
    }
}
