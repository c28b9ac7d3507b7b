// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitor.
//!
//! Holds the current online/offline state and turns an offline to online
//! transition into a drain request. It keeps no retry state of its own.

use std::sync::Arc;

use tokio::sync::{watch, Notify};

use super::remote::Remote;
use super::routes::health_request;

/// Result of [`ConnectivityMonitor::set_online`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    WentOnline,
    WentOffline,
    Unchanged,
}

/// Online/offline signal shared by the engine and its worker.
pub struct ConnectivityMonitor {
    state: watch::Sender<bool>,
    drain: Arc<Notify>,
}

impl ConnectivityMonitor {
    /// Creates a monitor that requests drains through `drain`.
    pub fn new(online: bool, drain: Arc<Notify>) -> Self {
        let (state, _) = watch::channel(online);
        Self { state, drain }
    }

    pub fn is_online(&self) -> bool {
        *self.state.borrow()
    }

    /// Records a connectivity signal. Going online requests a drain.
    pub fn set_online(&self, online: bool) -> Transition {
        let changed = self.state.send_if_modified(|current| {
            if *current == online {
                return false;
            }
            *current = online;
            true
        });
        match (changed, online) {
            (false, _) => Transition::Unchanged,
            (true, true) => {
                tracing::info!("connectivity: online");
                self.drain.notify_one();
                Transition::WentOnline
            }
            (true, false) => {
                tracing::info!("connectivity: offline");
                Transition::WentOffline
            }
        }
    }

    /// Watches state changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    /// Asks the remote whether it is reachable and records the answer.
    ///
    /// Any response, even an error status, proves reachability.
    pub async fn probe(&self, remote: &dyn Remote) -> bool {
        let online = match remote.call(health_request()).await {
            Ok(_) => true,
            Err(e) if e.is_connectivity() => {
                tracing::debug!(error = %e, "health probe failed");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "health probe answered with an error");
                true
            }
        };
        self.set_online(online);
        online
    }

    /// Human-readable state for status output.
    pub fn status_string(&self) -> &'static str {
        if self.is_online() {
            "online"
        } else {
            "offline"
        }
    }
}
