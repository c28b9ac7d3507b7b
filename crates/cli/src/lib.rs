// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ultisync - offline-first sync for players, teams and games.
//!
//! This crate provides the sync engine behind the `ultisync` CLI. Every
//! mutation is written to a local store first and queued; a drain pass pushes
//! the queue to the stats service whenever it is reachable.
//!
//! # Main Components
//!
//! - [`sync::SyncEngine`] - queue, cache, connectivity and the remote adapter
//! - [`sync::EntitySync`] - create/update/load/list/delete for one entity type
//! - [`sync::SyncWorker`] - background drain loop
//! - [`Config`] - optional `config.toml` in the state directory
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ultisync::sync::{EngineConfig, HttpRemote, SyncEngine};
//! use us_core::{FileStore, Player};
//!
//! let store = Arc::new(FileStore::open(&state_dir)?);
//! let remote = Arc::new(HttpRemote::new("http://localhost:8000", timeout)?);
//! let engine = SyncEngine::open(store, remote, EngineConfig::default())?;
//!
//! let alex = engine.players().create_offline(Player::new("Alex"))?;
//! engine.probe().await;
//! engine.drain().await?;
//! ```

mod cli;
mod commands;
mod display;
mod env;

pub mod config;
pub mod error;
pub mod sync;

pub use cli::{
    Cli, Command, GameCommand, OutputFormat, PlayerCommand, PlayerFields, RosterArgs, TeamCommand,
};
pub use config::Config;
pub use error::{Error, Result};

use commands::Session;

/// Runs a parsed command line to completion.
pub fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let session = Session::open(cli.state_dir.as_deref()).await?;
    let mut out = std::io::stdout();

    match cli.command {
        Command::Player(command) => commands::player::run(&session, command, &mut out).await,
        Command::Team(command) => commands::team::run(&session, command, &mut out).await,
        Command::Game(command) => commands::game::run(&session, command, &mut out).await,
        Command::Status { output } => commands::status::run(&session, output, &mut out),
        Command::Sync { output } => commands::sync::run(&session, output, &mut out).await,
        Command::Watch => commands::watch::run(&session, &mut out).await,
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
