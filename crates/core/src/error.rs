// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for us-core operations.

use thiserror::Error;

/// All possible errors that can occur in us-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid entity kind: '{0}'\n  hint: valid kinds are: player, team, game")]
    InvalidKind(String),

    #[error("invalid sync action: '{0}'\n  hint: valid actions are: create, update, delete, sync")]
    InvalidAction(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid store key: '{0}'\n  hint: keys are lowercase letters, digits, '_' and '-'")]
    InvalidKey(String),

    #[error("store is locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for us-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
