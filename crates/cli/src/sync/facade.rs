// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-kind public operations.
//!
//! Mutations write the local cache and the queue in one step (both or
//! neither) and return
//! without waiting for the remote; a drain is requested if online.

use std::collections::{BTreeMap, HashSet};
use std::marker::PhantomData;

use us_core::id::make_unique;
use us_core::record::{self, Record};
use us_core::{Entity, Error, SyncAction};

use super::engine::SyncEngine;
use super::error::{SyncError, SyncResult};
use super::routes::{route_for, Route};

/// An entity together with its confirmation state.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracked<E> {
    pub entity: E,
    /// True while the remote has not acknowledged the latest local write.
    pub unconfirmed: bool,
}

impl<E: Entity> Tracked<E> {
    fn from_record(record: &Record) -> us_core::Result<Self> {
        Ok(Tracked {
            entity: E::from_record(record)?,
            unconfirmed: record::is_unconfirmed(record),
        })
    }
}

/// Sync operations for one entity type.
pub struct EntitySync<'a, E> {
    engine: &'a SyncEngine,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> EntitySync<'a, E> {
    pub(super) fn new(engine: &'a SyncEngine) -> Self {
        EntitySync {
            engine,
            _entity: PhantomData,
        }
    }

    /// Stores a new entity locally and queues its creation.
    ///
    /// An id is derived if the entity has none. Creating again with the same
    /// explicit id replaces the local record and the pending entry.
    pub fn create_offline(&self, mut entity: E) -> SyncResult<Tracked<E>> {
        let now = self.engine.now();
        let id = {
            let mut state = self.engine.lock_state();
            let id = match entity.id() {
                Some(id) => id.to_string(),
                None => make_unique(entity.derive_id(&now), |candidate| {
                    state.knows(E::KIND, candidate)
                }),
            };
            entity.set_id(id.clone());
            entity.stamp(&now);

            let mut rec = entity.to_record()?;
            record::mark_unconfirmed(&mut rec);
            state.stage(E::KIND, SyncAction::Create, &id, rec, now)?;
            id
        };

        tracing::info!(kind = %E::KIND, id = %id, "created offline");
        self.engine.request_drain();
        Ok(Tracked {
            entity,
            unconfirmed: true,
        })
    }

    /// Queues an update of an existing entity. Games resend their full graph.
    pub fn push_update(&self, mut entity: E) -> SyncResult<Tracked<E>> {
        let id = entity
            .id()
            .map(str::to_string)
            .ok_or(SyncError::MissingId { kind: E::KIND })?;
        let now = self.engine.now();
        entity.stamp(&now);

        {
            let mut state = self.engine.lock_state();
            let mut rec = entity.to_record()?;
            record::mark_unconfirmed(&mut rec);
            state.stage(E::KIND, E::UPDATE_ACTION, &id, rec, now)?;
        }

        tracing::info!(kind = %E::KIND, id = %id, "update queued");
        self.engine.request_drain();
        Ok(Tracked {
            entity,
            unconfirmed: true,
        })
    }

    /// Returns the local copy if there is one; otherwise fetches (and
    /// caches) the remote copy when online.
    pub async fn load(&self, id: &str) -> SyncResult<Tracked<E>> {
        let route = self.route()?;
        if let Some(found) = self.local(id)? {
            return Ok(found);
        }
        if !self.engine.is_online() {
            return Err(self.offline(id));
        }

        let rec = match self.engine.remote().call(route.get_request(id)).await {
            Ok(value) => route.item(value)?,
            Err(e) if e.is_connectivity() => {
                self.engine.connectivity().set_online(false);
                return Err(self.offline(id));
            }
            Err(e) if e.is_not_found() => {
                return Err(SyncError::NotFound {
                    kind: E::KIND,
                    id: id.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let loaded = Tracked::from_record(&rec)?;

        // A local write may have landed while the call was in flight.
        if let Some(found) = self.local(id)? {
            return Ok(found);
        }
        self.engine.lock_state().cache.put(E::KIND, id, rec)?;
        Ok(loaded)
    }

    /// Lists entities.
    ///
    /// Online: the remote list merged with unconfirmed local records, the
    /// local version winning on an id collision. Offline, or if the remote
    /// call fails: every local record.
    pub async fn list(&self) -> SyncResult<Vec<Tracked<E>>> {
        let route = self.route()?;
        if self.engine.is_online() {
            let fetched = self
                .engine
                .remote()
                .call(route.list_request())
                .await
                .and_then(|value| route.items(value));
            match fetched {
                Ok(remote) => return Ok(self.merge(remote)),
                Err(e) => {
                    if e.is_connectivity() {
                        self.engine.connectivity().set_online(false);
                    }
                    tracing::warn!(kind = %E::KIND, error = %e, "remote list failed, using local records");
                }
            }
        }

        let records = self.engine.lock_state().cache.list_all(E::KIND);
        Ok(decode_all(&records))
    }

    /// Queues a delete and drops the local record immediately.
    pub fn delete_entity(&self, id: &str) -> SyncResult<()> {
        self.route()?;
        let now = self.engine.now();
        self.engine.lock_state().stage_delete(E::KIND, id, now)?;

        tracing::info!(kind = %E::KIND, id = %id, "delete queued");
        self.engine.request_drain();
        Ok(())
    }

    fn route(&self) -> SyncResult<&'static Route> {
        route_for(E::KIND).ok_or_else(|| Error::InvalidKind(E::KIND.to_string()).into())
    }

    fn local(&self, id: &str) -> SyncResult<Option<Tracked<E>>> {
        let state = self.engine.lock_state();
        if let Some(rec) = state.cache.get(E::KIND, id) {
            return Ok(Some(Tracked::from_record(rec)?));
        }
        if state.delete_pending(E::KIND, id) {
            return Err(SyncError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            });
        }
        Ok(None)
    }

    fn merge(&self, remote: Vec<Record>) -> Vec<Tracked<E>> {
        let state = self.engine.lock_state();
        let mut local: BTreeMap<String, Record> = state
            .cache
            .list_unconfirmed(E::KIND)
            .into_iter()
            .filter_map(|rec| record::record_id(&rec).map(str::to_string).map(|id| (id, rec)))
            .collect();

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for rec in remote {
            let Some(id) = record::record_id(&rec).map(str::to_string) else {
                continue;
            };
            if state.delete_pending(E::KIND, &id) || !seen.insert(id.clone()) {
                continue;
            }
            merged.push(local.remove(&id).unwrap_or(rec));
        }
        merged.extend(local.into_values());

        decode_all(&merged)
    }

    fn offline(&self, id: &str) -> SyncError {
        SyncError::Offline {
            kind: E::KIND,
            id: id.to_string(),
        }
    }
}

/// Decodes records, skipping any that do not fit the entity type.
fn decode_all<E: Entity>(records: &[Record]) -> Vec<Tracked<E>> {
    records
        .iter()
        .filter_map(|rec| match Tracked::from_record(rec) {
            Ok(tracked) => Some(tracked),
            Err(e) => {
                tracing::warn!(kind = %E::KIND, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect()
}
