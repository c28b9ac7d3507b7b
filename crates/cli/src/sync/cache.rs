// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity local cache.
//!
//! One id-keyed map per kind, each persisted as its own document. Every
//! mutation rewrites the whole map for that kind, and memory is updated only
//! after the write succeeds.

use std::collections::BTreeMap;
use std::sync::Arc;

use us_core::record::{self, Record};
use us_core::store::{read_document, write_document};
use us_core::{EntityKind, Error, KvStore};

/// Result type for cache operations.
pub type CacheResult<T> = us_core::Result<T>;

type KindMap = BTreeMap<String, Record>;

pub(super) const PLAYERS_KEY: &str = "local_players";
const TEAMS_KEY: &str = "local_teams";
const GAMES_KEY: &str = "local_games";

/// Store key of the document holding records of `kind`.
pub fn document_key(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::Player => Some(PLAYERS_KEY),
        EntityKind::Team => Some(TEAMS_KEY),
        EntityKind::Game => Some(GAMES_KEY),
        EntityKind::Unknown => None,
    }
}

/// Locally originated or cached records, keyed by kind and id.
pub struct LocalCache {
    store: Arc<dyn KvStore>,
    players: KindMap,
    teams: KindMap,
    games: KindMap,
}

impl LocalCache {
    /// Loads all three per-kind documents.
    pub fn load(store: Arc<dyn KvStore>) -> CacheResult<Self> {
        let players = read_document(store.as_ref(), PLAYERS_KEY)?;
        let teams = read_document(store.as_ref(), TEAMS_KEY)?;
        let games = read_document(store.as_ref(), GAMES_KEY)?;
        Ok(LocalCache {
            store,
            players,
            teams,
            games,
        })
    }

    pub fn get(&self, kind: EntityKind, id: &str) -> Option<&Record> {
        self.map(kind).and_then(|m| m.get(id))
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.get(kind, id).is_some()
    }

    /// Inserts or replaces a record and persists the kind's map.
    pub fn put(&mut self, kind: EntityKind, id: &str, record: Record) -> CacheResult<()> {
        let mut next = self
            .map(kind)
            .cloned()
            .ok_or_else(|| Error::InvalidKind(kind.to_string()))?;
        next.insert(id.to_string(), record);
        self.commit(kind, next)
    }

    /// Removes a record, returning it if present.
    pub fn remove(&mut self, kind: EntityKind, id: &str) -> CacheResult<Option<Record>> {
        let Some(mut next) = self.map(kind).cloned() else {
            return Ok(None);
        };
        let removed = next.remove(id);
        if removed.is_some() {
            self.commit(kind, next)?;
        }
        Ok(removed)
    }

    /// Clears the unconfirmed marker on a record. Returns whether it was set.
    pub fn clear_unconfirmed(&mut self, kind: EntityKind, id: &str) -> CacheResult<bool> {
        let Some(mut next) = self.map(kind).cloned() else {
            return Ok(false);
        };
        let cleared = next.get_mut(id).is_some_and(record::clear_unconfirmed);
        if cleared {
            self.commit(kind, next)?;
        }
        Ok(cleared)
    }

    /// Records of `kind` still awaiting remote confirmation, by id.
    pub fn list_unconfirmed(&self, kind: EntityKind) -> Vec<Record> {
        self.map(kind)
            .into_iter()
            .flat_map(|m| m.values())
            .filter(|r| record::is_unconfirmed(r))
            .cloned()
            .collect()
    }

    /// All records of `kind`, by id.
    pub fn list_all(&self, kind: EntityKind) -> Vec<Record> {
        self.map(kind)
            .into_iter()
            .flat_map(|m| m.values())
            .cloned()
            .collect()
    }

    /// Ids of unconfirmed records across all kinds.
    pub fn unconfirmed_ids(&self) -> Vec<(EntityKind, String)> {
        EntityKind::KNOWN
            .iter()
            .flat_map(|&kind| {
                self.map(kind)
                    .into_iter()
                    .flat_map(|m| m.iter())
                    .filter(|(_, r)| record::is_unconfirmed(r))
                    .map(move |(id, _)| (kind, id.clone()))
            })
            .collect()
    }

    fn map(&self, kind: EntityKind) -> Option<&KindMap> {
        match kind {
            EntityKind::Player => Some(&self.players),
            EntityKind::Team => Some(&self.teams),
            EntityKind::Game => Some(&self.games),
            EntityKind::Unknown => None,
        }
    }

    fn map_mut(&mut self, kind: EntityKind) -> Option<&mut KindMap> {
        match kind {
            EntityKind::Player => Some(&mut self.players),
            EntityKind::Team => Some(&mut self.teams),
            EntityKind::Game => Some(&mut self.games),
            EntityKind::Unknown => None,
        }
    }

    /// Writes `next` as the kind's document, then swaps it in.
    fn commit(&mut self, kind: EntityKind, next: KindMap) -> CacheResult<()> {
        let key = document_key(kind).ok_or_else(|| Error::InvalidKind(kind.to_string()))?;
        write_document(self.store.as_ref(), key, &next)?;
        if let Some(map) = self.map_mut(kind) {
            *map = next;
        }
        Ok(())
    }
}
