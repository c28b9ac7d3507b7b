// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use us_core::Team;

use crate::cli::{RosterArgs, TeamCommand};
use crate::display::{format_team_detail, format_team_line};
use crate::error::{Error, Result};

use super::Session;

pub async fn run(session: &Session, command: TeamCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        TeamCommand::Add { name, id, roster } => add(session, name, id, roster, out).await,
        TeamCommand::Edit { id, name, roster } => edit(session, &id, name, roster, out).await,
        TeamCommand::Show { id, output } => {
            super::show::<Team>(session, &id, output, format_team_detail, out).await
        }
        TeamCommand::List { output } => {
            super::list::<Team>(session, output, format_team_line, out).await
        }
        TeamCommand::Rm { id } => super::remove::<Team>(session, &id, out).await,
    }
}

pub async fn add(
    session: &Session,
    name: String,
    id: Option<String>,
    roster: RosterArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let mut team = Team::new(name);
    team.id = id;
    team.player_ids = dedup(roster.players);

    let tracked = session.engine.teams().create_offline(team)?;
    super::saved(session, &tracked, out).await
}

/// Renames a team and/or replaces its roster.
pub async fn edit(
    session: &Session,
    id: &str,
    name: Option<String>,
    roster: RosterArgs,
    out: &mut dyn Write,
) -> Result<()> {
    if name.is_none() && roster.players.is_empty() {
        return Err(Error::NothingToChange);
    }

    let mut team = session.engine.teams().load(id).await?.entity;
    if let Some(name) = name {
        team.name = name;
    }
    if !roster.players.is_empty() {
        team.player_ids = dedup(roster.players);
    }

    let tracked = session.engine.teams().push_update(team)?;
    super::saved(session, &tracked, out).await
}

/// Drops repeated player ids, keeping first occurrence order.
fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
#[path = "team_tests.rs"]
mod tests;
