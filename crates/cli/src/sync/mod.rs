// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync engine for players, teams and games.
//!
//! Mutations land in the local cache and the sync queue immediately; a
//! single-flight drain pushes them to the remote in dependency order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Facade    │────►│   Engine    │────►│  Processor  │
//! │ (EntitySync)│     │ (SyncEngine)│     │   (drain)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                        │       │               │
//!                        ▼       ▼               ▼
//!               ┌─────────┐ ┌─────────┐   ┌─────────────┐
//!               │  Queue  │ │  Cache  │   │   Remote    │
//!               │(KvStore)│ │(KvStore)│   │   (trait)   │
//!               └─────────┘ └─────────┘   └─────────────┘
//! ```
//!
//! # Features
//!
//! - Queue deduplicated per `(kind, id)`, drained players, then teams, then games
//! - Abort the pass on connectivity loss, record and continue on rejection
//! - Fixed-delay retries while entries remain, drain on reconnect
//! - Injectable store, remote and clock for testing

mod cache;
mod connectivity;
mod engine;
mod error;
mod facade;
mod processor;
mod queue;
mod remote;
mod routes;
mod worker;

pub use cache::LocalCache;
pub use connectivity::{ConnectivityMonitor, Transition};
pub use engine::{EngineConfig, EngineState, SyncEngine, SyncSummary};
pub use error::{SyncError, SyncResult};
pub use facade::{EntitySync, Tracked};
pub use processor::{DrainOutcome, DrainReport, SkipReason, SyncProcessor};
pub use queue::{PendingCounts, SyncQueue, QUEUE_KEY};
pub use remote::{
    error_detail, HttpRemote, Method, Remote, RemoteError, RemoteFuture, RemoteRequest,
    RemoteResult,
};
pub use routes::{health_request, route_for, Graduation, Route, Upsert, ROUTES};
pub use worker::SyncWorker;

#[cfg(test)]
pub(crate) mod test_helpers;







#[cfg(test)]
mod remote_tests;
