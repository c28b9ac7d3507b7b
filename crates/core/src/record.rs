// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local records: plain JSON attribute bags.
//!
//! A record is what the engine stores and transmits. The engine never looks
//! inside a record beyond its `id` and the unconfirmed marker, so nested game
//! data passes through untouched.

use serde_json::Value;

use crate::error::{Error, Result};

/// A JSON object holding an entity's attributes.
pub type Record = serde_json::Map<String, Value>;

/// Client-side marker for a record the remote has never acknowledged.
///
/// Never transmitted; [`strip_local_fields`] removes it before dispatch.
pub const LOCAL_ONLY: &str = "_localOnly";

/// Converts a JSON value into a record, rejecting non-objects.
pub fn from_value(value: Value) -> Result<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidRecord(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Returns the record's `id` attribute if it is a non-empty string.
pub fn record_id(record: &Record) -> Option<&str> {
    record
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Returns true if the record carries the unconfirmed marker.
pub fn is_unconfirmed(record: &Record) -> bool {
    record
        .get(LOCAL_ONLY)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Sets the unconfirmed marker.
pub fn mark_unconfirmed(record: &mut Record) {
    record.insert(LOCAL_ONLY.to_string(), Value::Bool(true));
}

/// Removes the unconfirmed marker. Returns true if it was present.
pub fn clear_unconfirmed(record: &mut Record) -> bool {
    record.remove(LOCAL_ONLY).is_some()
}

/// Returns a copy of the record with client-only fields removed.
pub fn strip_local_fields(record: &Record) -> Record {
    let mut stripped = record.clone();
    stripped.remove(LOCAL_ONLY);
    stripped
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
