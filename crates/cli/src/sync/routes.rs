// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-kind request strategies.
//!
//! Everything kind-specific about talking to the remote lives in [`ROUTES`]:
//! the collection path, how an upsert is addressed, how the payload is
//! shaped, and what happens to the local record once the remote confirms it.
//! Supporting another kind means adding a row.

use serde_json::Value;
use us_core::record::{self, Record};
use us_core::{EntityKind, QueueEntry};

use super::remote::{RemoteError, RemoteRequest, RemoteResult};

/// How an upsert is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// `POST /{collection}` with the id embedded in the body.
    Collection,
    /// `POST /{collection}/{id}/sync` carrying the full nested graph.
    SyncEndpoint,
}

/// What happens to the local record after a confirmed upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Graduation {
    /// Keep the record as a confirmed cached copy.
    ClearMarker,
    /// Drop the local shadow; the remote copy is authoritative.
    Remove,
}

/// Request-building strategy for one entity kind.
#[derive(Debug)]
pub struct Route {
    pub kind: EntityKind,
    pub collection: &'static str,
    pub upsert: Upsert,
    pub graduation: Graduation,
    /// Key carrying the id in list items, when it is not `id`.
    pub list_id_key: &'static str,
    /// Fills in fields the remote expects on an upsert body.
    pub shape: fn(&mut Record, &str),
}

pub static ROUTES: [Route; 3] = [
    Route {
        kind: EntityKind::Player,
        collection: "players",
        upsert: Upsert::Collection,
        graduation: Graduation::ClearMarker,
        list_id_key: "id",
        shape: embed_id,
    },
    Route {
        kind: EntityKind::Team,
        collection: "teams",
        upsert: Upsert::Collection,
        graduation: Graduation::ClearMarker,
        list_id_key: "id",
        shape: shape_team,
    },
    Route {
        kind: EntityKind::Game,
        collection: "games",
        upsert: Upsert::SyncEndpoint,
        graduation: Graduation::Remove,
        list_id_key: "game_id",
        shape: embed_id,
    },
];

/// Looks up the route for `kind`. `Unknown` has none.
pub fn route_for(kind: EntityKind) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.kind == kind)
}

/// Health probe request.
pub fn health_request() -> RemoteRequest {
    RemoteRequest::get(["health"])
}

impl Route {
    /// Builds the request for a queued entry. Client-only fields are
    /// stripped from the payload.
    pub fn request_for(&self, entry: &QueueEntry) -> RemoteRequest {
        if entry.action.is_upsert() {
            let payload = entry.payload.clone().unwrap_or_default();
            self.upsert_request(&entry.entity_id, &payload)
        } else {
            self.delete_request(&entry.entity_id)
        }
    }

    pub fn upsert_request(&self, id: &str, payload: &Record) -> RemoteRequest {
        let mut body = record::strip_local_fields(payload);
        (self.shape)(&mut body, id);
        let body = Value::Object(body);
        match self.upsert {
            Upsert::Collection => RemoteRequest::post([self.collection], body),
            Upsert::SyncEndpoint => RemoteRequest::post([self.collection, id, "sync"], body),
        }
    }

    pub fn delete_request(&self, id: &str) -> RemoteRequest {
        RemoteRequest::delete([self.collection, id])
    }

    pub fn get_request(&self, id: &str) -> RemoteRequest {
        RemoteRequest::get([self.collection, id])
    }

    pub fn list_request(&self) -> RemoteRequest {
        RemoteRequest::get([self.collection])
    }

    /// Decodes a single-entity response.
    pub fn item(&self, response: Value) -> RemoteResult<Record> {
        record::from_value(response).map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }

    /// Decodes a list response, either `{"<collection>": [...]}` or a bare
    /// array. An id under [`Route::list_id_key`] is copied to `id`; items
    /// with neither are skipped.
    pub fn items(&self, response: Value) -> RemoteResult<Vec<Record>> {
        let list = match response {
            Value::Array(list) => list,
            Value::Object(mut wrapper) => match wrapper.remove(self.collection) {
                Some(Value::Array(list)) => list,
                _ => {
                    return Err(RemoteError::InvalidResponse(format!(
                        "expected a '{}' array",
                        self.collection
                    )))
                }
            },
            other => {
                return Err(RemoteError::InvalidResponse(format!(
                    "expected a list of {}, got {}",
                    self.collection, other
                )))
            }
        };
        Ok(list
            .into_iter()
            .filter_map(|item| record::from_value(item).ok())
            .map(|rec| self.normalize_id(rec))
            .filter(|rec| record::record_id(rec).is_some())
            .collect())
    }

    fn normalize_id(&self, mut rec: Record) -> Record {
        if record::record_id(&rec).is_none() {
            if let Some(id) = rec.get(self.list_id_key).cloned() {
                rec.insert("id".to_string(), id);
            }
        }
        rec
    }
}

fn embed_id(body: &mut Record, id: &str) {
    body.insert("id".to_string(), Value::String(id.to_string()));
}

fn shape_team(body: &mut Record, id: &str) {
    embed_id(body, id);
    body.entry("playerIds")
        .or_insert_with(|| Value::Array(Vec::new()));
}
