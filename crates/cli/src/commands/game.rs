// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde_json::Value;
use us_core::{record, Entity, Game};

use crate::cli::GameCommand;
use crate::display::{format_game_detail, format_game_line};
use crate::error::{Error, Result};

use super::Session;

pub async fn run(session: &Session, command: GameCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        GameCommand::Add {
            team,
            opponent,
            team_id,
            id,
        } => add(session, team, opponent, team_id, id, out).await,
        GameCommand::Push { file } => push(session, &file, out).await,
        GameCommand::Show { id, output } => {
            super::show::<Game>(session, &id, output, format_game_detail, out).await
        }
        GameCommand::List { output } => {
            super::list::<Game>(session, output, format_game_line, out).await
        }
        GameCommand::Rm { id } => super::remove::<Game>(session, &id, out).await,
    }
}

pub async fn add(
    session: &Session,
    team: String,
    opponent: String,
    team_id: Option<String>,
    id: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut game = Game::new(team, opponent);
    game.team_id = team_id;
    game.id = id;

    let tracked = session.engine.games().create_offline(game)?;
    super::saved(session, &tracked, out).await
}

/// Stores a full game graph read from a file (or stdin for `-`).
///
/// A game with an id is resent in full; one without gets a derived id.
pub async fn push(session: &Session, path: &Path, out: &mut dyn Write) -> Result<()> {
    let game = read_game(path)?;
    let games = session.engine.games();
    let tracked = if game.id().is_some() {
        games.push_update(game)?
    } else {
        games.create_offline(game)?
    };
    super::saved(session, &tracked, out).await
}

fn read_game(path: &Path) -> Result<Game> {
    let input_error = |reason: String| Error::InputFile {
        path: path.display().to_string(),
        reason,
    };

    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| input_error(e.to_string()))?;
        text
    } else {
        fs::read_to_string(path).map_err(|e| input_error(e.to_string()))?
    };

    let value: Value = serde_json::from_str(&text).map_err(|e| input_error(e.to_string()))?;
    let rec = record::from_value(value).map_err(|e| input_error(e.to_string()))?;
    let game = Game::from_record(&rec).map_err(|e| input_error(e.to_string()))?;

    if game.team.trim().is_empty() {
        return Err(Error::FieldEmpty { field: "team" });
    }
    if game.opponent.trim().is_empty() {
        return Err(Error::FieldEmpty { field: "opponent" });
    }
    Ok(game)
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
