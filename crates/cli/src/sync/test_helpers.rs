// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use us_core::{ClockSource, KvStore, ManualClock, MemoryStore};

use super::engine::{EngineConfig, SyncEngine};
use super::remote::{Method, Remote, RemoteError, RemoteFuture, RemoteRequest, RemoteResult};

/// Scripted remote for testing without a server.
///
/// Every call is recorded. Scripted outcomes are replayed in order; once
/// they run out, GETs answer from canned responses (404 if none) and other
/// calls succeed with `{"status": "ok"}`.
#[derive(Clone, Default)]
pub struct MockRemote {
    requests: Arc<Mutex<Vec<RemoteRequest>>>,
    script: Arc<Mutex<VecDeque<RemoteResult<Value>>>>,
    canned: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next unscripted call.
    pub fn push(&self, outcome: RemoteResult<Value>) {
        self.script.lock().unwrap().push_back(outcome);
    }

    pub fn push_ok(&self) {
        self.push(Ok(json!({"status": "ok"})));
    }

    pub fn push_unreachable(&self) {
        self.push(Err(RemoteError::Unreachable("connection refused".into())));
    }

    pub fn push_rejected(&self, status: u16, detail: &str) {
        self.push(Err(RemoteError::Rejected {
            status,
            detail: detail.into(),
        }));
    }

    /// Answers GETs of `path` with `body`.
    pub fn respond(&self, path: &str, body: Value) {
        self.canned.lock().unwrap().push((path.to_string(), body));
    }

    /// All requests seen so far.
    pub fn requests(&self) -> Vec<RemoteRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD /path` of every request seen so far.
    pub fn calls(&self) -> Vec<String> {
        self.requests().iter().map(ToString::to_string).collect()
    }

    fn answer(&self, request: &RemoteRequest) -> RemoteResult<Value> {
        if let Some(outcome) = self.script.lock().unwrap().pop_front() {
            return outcome;
        }
        if request.method != Method::Get {
            return Ok(json!({"status": "ok"}));
        }
        let path = request.path();
        self.canned
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| *p == path)
            .map(|(_, body)| body.clone())
            .ok_or(RemoteError::Rejected {
                status: 404,
                detail: "Not found".into(),
            })
    }
}

impl Remote for MockRemote {
    fn call(&self, request: RemoteRequest) -> RemoteFuture<'_> {
        let outcome = self.answer(&request);
        self.requests.lock().unwrap().push(request);
        Box::pin(async move { outcome })
    }
}

/// Memory store whose writes to chosen keys fail, like a full disk.
#[derive(Clone, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    fn check(&self, key: &str) -> us_core::Result<()> {
        if self.failing.lock().unwrap().contains(key) {
            return Err(std::io::Error::other("no space left on device").into());
        }
        Ok(())
    }
}

impl KvStore for FailingStore {
    fn get(&self, key: &str) -> us_core::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> us_core::Result<()> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> us_core::Result<()> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

/// A fixed instant for deterministic ids.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, 14, 30, 5).unwrap()
}

/// Everything a test needs to poke at an engine and rebuild it.
pub struct Harness {
    pub store: MemoryStore,
    pub remote: MockRemote,
    pub clock: Arc<ManualClock>,
    pub engine: SyncEngine,
}

impl Harness {
    /// Engine over a fresh memory store, starting offline.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), MockRemote::new())
    }

    /// Engine over a fresh memory store, starting online.
    pub fn online() -> Self {
        let harness = Self::new();
        harness.engine.set_online(true);
        harness
    }

    pub fn with_store(store: MemoryStore, remote: MockRemote) -> Self {
        let clock = Arc::new(ManualClock::new(start_time()));
        let engine = build_engine(Arc::new(store.clone()), &remote, clock.clone());
        Harness {
            store,
            remote,
            clock,
            engine,
        }
    }

    /// Drops the engine and opens a new one over the same persisted data.
    pub fn restart(self) -> Self {
        let Harness {
            store,
            remote,
            clock,
            engine,
        } = self;
        drop(engine);
        let engine = build_engine(Arc::new(store.clone()), &remote, clock.clone());
        Harness {
            store,
            remote,
            clock,
            engine,
        }
    }

    /// Raw persisted document.
    pub fn document(&self, key: &str) -> Option<Value> {
        self.store
            .get(key)
            .unwrap()
            .map(|text| serde_json::from_str(&text).unwrap())
    }
}

/// Offline engine over an arbitrary store.
pub fn engine_on(store: Arc<dyn KvStore>, remote: &MockRemote) -> SyncEngine {
    build_engine(store, remote, Arc::new(ManualClock::new(start_time())))
}

fn build_engine(
    store: Arc<dyn KvStore>,
    remote: &MockRemote,
    clock: Arc<ManualClock>,
) -> SyncEngine {
    let clock: Arc<dyn ClockSource> = clock;
    SyncEngine::open(
        store,
        Arc::new(remote.clone()),
        EngineConfig::default(),
    )
    .unwrap()
    .with_clock(clock)
}
