// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{RemoteError, SyncError};

/// All possible errors that can occur in the ultisync CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("state directory is in use: {0}\n  hint: another ultisync process (perhaps `ultisync watch`) holds the lock")]
    StateLocked(String),

    #[error("{0}")]
    Core(us_core::Error),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("nothing to change\n  hint: pass at least one field to update")]
    NothingToChange,

    #[error("cannot read {path}: {reason}")]
    InputFile { path: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
}

impl From<us_core::Error> for Error {
    fn from(e: us_core::Error) -> Self {
        match e {
            us_core::Error::Locked(dir) => Error::StateLocked(dir),
            other => Error::Core(other),
        }
    }
}

/// A specialized Result type for ultisync operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
