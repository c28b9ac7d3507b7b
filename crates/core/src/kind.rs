// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity kinds and sync actions.
//!
//! The kind of an entity decides its drain priority: players are pushed
//! before teams, teams before games, so the remote can enforce references
//! without the client racing itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Category of a synced entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Team,
    Game,
    /// A kind this build does not recognise (e.g. read back from a queue
    /// written by a newer client). Drained last and never dispatched.
    #[serde(other)]
    Unknown,
}

impl EntityKind {
    /// The kinds the engine knows how to sync, in drain order.
    pub const KNOWN: [EntityKind; 3] = [EntityKind::Player, EntityKind::Team, EntityKind::Game];

    /// Drain priority; lower values are pushed first.
    pub fn priority(&self) -> u8 {
        match self {
            EntityKind::Player => 0,
            EntityKind::Team => 1,
            EntityKind::Game => 2,
            EntityKind::Unknown => 3,
        }
    }

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Team => "team",
            EntityKind::Game => "game",
            EntityKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "player" | "players" => Ok(EntityKind::Player),
            "team" | "teams" => Ok(EntityKind::Team),
            "game" | "games" => Ok(EntityKind::Game),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

/// The mutation a queue entry carries to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Create,
    Update,
    Delete,
    /// Full upsert of a game and its nested point/possession/event graph.
    Sync,
}

impl SyncAction {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncAction::Create => "create",
            SyncAction::Update => "update",
            SyncAction::Delete => "delete",
            SyncAction::Sync => "sync",
        }
    }

    /// Returns true if this action writes the payload (as opposed to deleting).
    pub fn is_upsert(&self) -> bool {
        !matches!(self, SyncAction::Delete)
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(SyncAction::Create),
            "update" => Ok(SyncAction::Update),
            "delete" => Ok(SyncAction::Delete),
            "sync" => Ok(SyncAction::Sync),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
