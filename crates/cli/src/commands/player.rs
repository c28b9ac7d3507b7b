// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use us_core::Player;

use crate::cli::{OutputFormat, PlayerCommand, PlayerFields};
use crate::display::{format_player_detail, format_player_line};
use crate::error::{Error, Result};

use super::{apply_optional, Session};

pub async fn run(session: &Session, command: PlayerCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        PlayerCommand::Add { name, id, fields } => add(session, name, id, fields, out).await,
        PlayerCommand::Edit { id, name, fields } => edit(session, &id, name, fields, out).await,
        PlayerCommand::Show { id, output } => show(session, &id, output, out).await,
        PlayerCommand::List { output } => {
            super::list::<Player>(session, output, format_player_line, out).await
        }
        PlayerCommand::Rm { id } => super::remove::<Player>(session, &id, out).await,
    }
}

pub async fn add(
    session: &Session,
    name: String,
    id: Option<String>,
    fields: PlayerFields,
    out: &mut dyn Write,
) -> Result<()> {
    let mut player = Player::new(name);
    player.id = id;
    apply_fields(&mut player, fields);

    let tracked = session.engine.players().create_offline(player)?;
    super::saved(session, &tracked, out).await
}

pub async fn edit(
    session: &Session,
    id: &str,
    name: Option<String>,
    fields: PlayerFields,
    out: &mut dyn Write,
) -> Result<()> {
    if name.is_none() && fields.is_empty() {
        return Err(Error::NothingToChange);
    }

    let mut player = session.engine.players().load(id).await?.entity;
    if let Some(name) = name {
        player.name = name;
    }
    apply_fields(&mut player, fields);

    let tracked = session.engine.players().push_update(player)?;
    super::saved(session, &tracked, out).await
}

async fn show(session: &Session, id: &str, output: OutputFormat, out: &mut dyn Write) -> Result<()> {
    super::show::<Player>(session, id, output, format_player_detail, out).await
}

fn apply_fields(player: &mut Player, fields: PlayerFields) {
    apply_optional(&mut player.nickname, fields.nickname);
    apply_optional(&mut player.number, fields.number);
    apply_optional(&mut player.gender, fields.gender);
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod tests;
