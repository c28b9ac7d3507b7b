// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod game;
pub mod player;
pub mod status;
pub mod sync;
pub mod team;
pub mod watch;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use us_core::{Entity, FileStore, KvStore};

use crate::cli::OutputFormat;
use crate::config::{self, Config};
use crate::display;
use crate::error::Result;
use crate::sync::{EngineConfig, HttpRemote, Remote, SyncEngine, Tracked};

/// An open engine plus the configuration it was built from.
pub struct Session {
    pub engine: Arc<SyncEngine>,
    pub config: Config,
    /// Remote base URL, resolved once when the session opened.
    pub api_url: String,
}

impl Session {
    /// Opens the state directory and probes the remote once.
    pub async fn open(state_dir: Option<&Path>) -> Result<Self> {
        let dir = config::state_dir(state_dir)?;
        let config = Config::load(&dir)?;
        let api_url = config.resolve_api_url();
        let store: Arc<dyn KvStore> = Arc::new(FileStore::open(&dir)?);
        let remote: Arc<dyn Remote> =
            Arc::new(HttpRemote::new(&api_url, config.request_timeout())?);
        let engine = SyncEngine::open(
            store,
            remote,
            EngineConfig {
                retry_delay: config.retry_delay(),
                start_online: false,
            },
        )?;
        tracing::debug!(state_dir = %dir.display(), api_url = %api_url, "session opened");

        let session = Session::new(Arc::new(engine), config, api_url);
        session.engine.probe().await;
        Ok(session)
    }

    pub fn new(engine: Arc<SyncEngine>, config: Config, api_url: String) -> Self {
        Session {
            engine,
            config,
            api_url,
        }
    }

    /// Runs one drain pass if the remote is reachable.
    ///
    /// The local write has already succeeded, so drain errors are logged
    /// rather than returned.
    pub async fn flush(&self) {
        if !self.engine.is_online() {
            return;
        }
        match self.engine.drain().await {
            Ok(report) => tracing::debug!(?report, "flushed pending changes"),
            Err(e) => tracing::warn!(error = %e, "flush failed"),
        }
    }
}

/// Prints one entity.
pub(crate) async fn show<E: Entity>(
    session: &Session,
    id: &str,
    output: OutputFormat,
    format: fn(&Tracked<E>) -> String,
    out: &mut dyn Write,
) -> Result<()> {
    let tracked = session.engine.entities::<E>().load(id).await?;
    match output {
        OutputFormat::Text => writeln!(out, "{}", format(&tracked))?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&display::tracked_json(&tracked)?)?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

/// Prints every entity of one kind, one per line.
pub(crate) async fn list<E: Entity>(
    session: &Session,
    output: OutputFormat,
    format: fn(&Tracked<E>) -> String,
    out: &mut dyn Write,
) -> Result<()> {
    let items = session.engine.entities::<E>().list().await?;
    match output {
        OutputFormat::Text => {
            for item in &items {
                writeln!(out, "{}", format(item))?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&display::tracked_json_list(&items)?)?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

/// Deletes an entity locally and queues the remote delete.
pub(crate) async fn remove<E: Entity>(
    session: &Session,
    id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    session.engine.entities::<E>().delete_entity(id)?;
    writeln!(out, "Deleted {} {}", E::KIND, id)?;
    session.flush().await;
    Ok(())
}

/// Prints the id of a stored entity, then pushes it if possible.
pub(crate) async fn saved<E: Entity>(
    session: &Session,
    tracked: &Tracked<E>,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{}", tracked.entity.id().unwrap_or_default())?;
    session.flush().await;
    Ok(())
}

/// Applies an optional text edit. An empty value clears the field.
pub(crate) fn apply_optional(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *slot = Some(value).filter(|v| !v.trim().is_empty());
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
pub(crate) mod testing;
