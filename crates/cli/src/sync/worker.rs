// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background drain loop.
//!
//! The worker runs a pass whenever a drain is requested (a facade mutation
//! while online, or the monitor seeing connectivity return), again after the
//! retry delay while entries remain, and optionally probes the remote on a
//! fixed interval. It stops when its cancellation token fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::engine::SyncEngine;

/// Drives an engine's drain passes until cancelled.
pub struct SyncWorker {
    engine: Arc<SyncEngine>,
    probe_interval: Option<Duration>,
    cancel_token: CancellationToken,
}

impl SyncWorker {
    pub fn new(engine: Arc<SyncEngine>, cancel_token: CancellationToken) -> Self {
        Self {
            engine,
            probe_interval: None,
            cancel_token,
        }
    }

    /// Probes the remote every `interval` to pick up connectivity changes.
    pub fn with_probe_interval(mut self, interval: Option<Duration>) -> Self {
        self.probe_interval = interval;
        self
    }

    /// Spawns the loop on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs the loop. An initial pass is attempted straight away.
    pub async fn run(self) {
        let drain = self.engine.drain_signal();
        let mut probe = self.probe_interval.map(|period| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        let mut retry_at = self.pass().await;

        loop {
            let retry = async {
                match retry_at {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };
            let probe_tick = async {
                match probe.as_mut() {
                    Some(interval) => {
                        interval.tick().await;
                    }
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                _ = self.cancel_token.cancelled() => break,
                _ = drain.notified() => {}
                _ = retry => {}
                _ = probe_tick => {
                    // Coming back online requests a drain through the monitor.
                    self.engine.probe().await;
                    continue;
                }
            }

            retry_at = self.pass().await;
        }

        tracing::debug!("sync worker stopped");
    }

    /// Runs one pass and returns when the next retry is due, if any.
    async fn pass(&self) -> Option<Instant> {
        let delay = self.engine.retry_delay();
        match self.engine.drain().await {
            Ok(report) if report.needs_retry(self.engine.is_online()) => {
                Some(Instant::now() + delay)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "drain failed");
                Some(Instant::now() + delay)
            }
        }
    }
}
