// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;
use std::io::Write;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::sync::SyncWorker;

use super::Session;

/// Runs the sync worker in the foreground until Ctrl-C.
pub async fn run(session: &Session, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", banner(session))?;
    out.flush()?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    watch_until(session, shutdown, out).await
}

fn banner(session: &Session) -> String {
    format!(
        "Watching {} ({}), Ctrl-C to stop",
        session.api_url,
        session.engine.connectivity().status_string()
    )
}

/// Runs the worker until `shutdown` resolves, reporting connectivity changes.
pub(crate) async fn watch_until(
    session: &Session,
    shutdown: impl Future<Output = ()>,
    out: &mut dyn Write,
) -> Result<()> {
    let cancel = CancellationToken::new();
    let handle = SyncWorker::new(session.engine.clone(), cancel.clone())
        .with_probe_interval(session.config.probe_interval())
        .spawn();

    let mut connectivity = session.engine.connectivity().subscribe();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = connectivity.changed() => {
                if changed.is_err() {
                    break;
                }
                let online = *connectivity.borrow_and_update();
                writeln!(out, "{}", if online { "online" } else { "offline" })?;
                out.flush()?;
            }
        }
    }

    cancel.cancel();
    if let Err(e) = handle.await {
        tracing::warn!(error = %e, "sync worker ended abnormally");
    }

    let pending = session.engine.summary().pending.total();
    if pending > 0 {
        writeln!(out, "{} change(s) still pending", pending)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
