// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use us_core::EntityKind;

use super::remote::RemoteError;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// An update was pushed for an entity that has no id.
    #[error("{kind} has no id\n  hint: create it first, or pass an explicit id")]
    MissingId { kind: EntityKind },

    /// A load missed the local cache while offline.
    #[error("{kind} {id} is not available offline\n  hint: it is not cached locally; reconnect to load it")]
    Offline { kind: EntityKind, id: String },

    /// The entity was deleted locally and the delete is still pending.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] us_core::Error),
}

/// Result type for engine operations.
pub type SyncResult<T> = Result<T, SyncError>;
