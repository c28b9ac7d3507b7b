// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! us-core: Shared library for the ultisync offline-first sync engine
//!
//! This crate provides the data model (entity kinds, queue entries, local
//! records, the Player/Team/Game shapes), deterministic id generation, the
//! clock seam, and the key-value persistence surface used by the engine.

pub mod clock;
pub mod entity;
pub mod entry;
pub mod error;
pub mod id;
pub mod kind;
pub mod record;
pub mod store;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use entity::{Entity, Game, Player, Point, Possession, Team};
pub use entry::QueueEntry;
pub use error::{Error, Result};
pub use kind::{EntityKind, SyncAction};
pub use record::{Record, LOCAL_ONLY};
pub use store::{FileStore, KvStore, MemoryStore};
