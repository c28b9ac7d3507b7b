// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synced entity types.
//!
//! [`Entity`] is the seam between caller-owned types and the engine's
//! attribute-bag records. The default [`Player`], [`Team`] and [`Game`]
//! types mirror the remote service's JSON shapes and keep any attribute they
//! do not model in `extra`, so nothing is lost on a round trip. A caller
//! with its own game representation implements [`Entity`] for it and the
//! engine uses that impl to serialize and deserialize games.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::id;
use crate::kind::{EntityKind, SyncAction};
use crate::record::{self, Record, LOCAL_ONLY};

/// A type the sync engine can store locally and push to the remote.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The queue kind this type is synced as.
    const KIND: EntityKind;

    /// Action enqueued when an existing entity is pushed again.
    const UPDATE_ACTION: SyncAction = SyncAction::Update;

    /// The entity's id, if it has one.
    fn id(&self) -> Option<&str>;

    /// Assigns the entity's id.
    fn set_id(&mut self, id: String);

    /// Derives a base id from the entity's content and the creation time.
    ///
    /// Collisions with ids already known locally are resolved by the caller.
    fn derive_id(&self, now: &DateTime<Utc>) -> String;

    /// Records creation and modification timestamps.
    fn stamp(&mut self, now: &DateTime<Utc>);

    /// Serializes the entity into a record.
    fn to_record(&self) -> Result<Record> {
        record::from_value(serde_json::to_value(self)?)
    }

    /// Rebuilds the entity from a record, ignoring client-only fields.
    fn from_record(record: &Record) -> Result<Self> {
        let mut clean = record.clone();
        clean.remove(LOCAL_ONLY);
        Ok(serde_json::from_value(Value::Object(clean))?)
    }
}

/// Formats a timestamp the way entity records carry them.
pub fn timestamp(now: &DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A player on one or more teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Jersey number. Kept as text; the remote accepts either form.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Record,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for Player {
    const KIND: EntityKind = EntityKind::Player;

    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn derive_id(&self, now: &DateTime<Utc>) -> String {
        id::generate_id(&self.name, "player", now)
    }

    fn stamp(&mut self, now: &DateTime<Utc>) {
        let ts = timestamp(now);
        self.created_at.get_or_insert_with(|| ts.clone());
        self.updated_at = Some(ts);
    }
}

/// A team and its roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub player_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Record,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for Team {
    const KIND: EntityKind = EntityKind::Team;

    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn derive_id(&self, now: &DateTime<Utc>) -> String {
        id::generate_id(&self.name, "team", now)
    }

    fn stamp(&mut self, now: &DateTime<Utc>) {
        let ts = timestamp(now);
        self.created_at.get_or_insert_with(|| ts.clone());
        self.updated_at = Some(ts);
    }
}

/// A game: the two sides plus the ordered point-by-point record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub team: String,
    pub opponent: String,
    /// Reference to the team this game was played by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_start_timestamp: Option<String>,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Record,
}

impl Game {
    pub fn new(team: impl Into<String>, opponent: impl Into<String>) -> Self {
        Game {
            team: team.into(),
            opponent: opponent.into(),
            ..Default::default()
        }
    }
}

impl Entity for Game {
    const KIND: EntityKind = EntityKind::Game;
    // Games are append-mostly and always resent in full.
    const UPDATE_ACTION: SyncAction = SyncAction::Sync;

    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn derive_id(&self, now: &DateTime<Utc>) -> String {
        id::generate_game_id(&self.team, &self.opponent, now)
    }

    fn stamp(&mut self, now: &DateTime<Utc>) {
        let ts = timestamp(now);
        self.game_start_timestamp.get_or_insert_with(|| ts.clone());
        self.created_at.get_or_insert_with(|| ts.clone());
        self.updated_at = Some(ts);
    }
}

/// One point of a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub possessions: Vec<Possession>,
    #[serde(flatten)]
    pub extra: Record,
}

/// One possession within a point. Events are opaque to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Possession {
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(flatten)]
    pub extra: Record,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
