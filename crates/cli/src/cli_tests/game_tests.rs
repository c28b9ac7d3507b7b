// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use std::path::Path;

#[test]
fn add_requires_both_sides() {
    assert!(parse(&["ultisync", "game", "add", "--team", "Thunder"]).is_err());
    assert!(parse(&["ultisync", "game", "add", "--opponent", "Lightning"]).is_err());
}

#[test]
fn add_with_team_id() {
    let cli = parse(&[
        "ultisync",
        "game",
        "add",
        "--team",
        "Thunder",
        "--opponent",
        "Lightning",
        "--team-id",
        "Thunder-00aa11bb",
    ])
    .unwrap();
    match cli.command {
        Command::Game(GameCommand::Add {
            team,
            opponent,
            team_id,
            id,
        }) => {
            assert_eq!(team, "Thunder");
            assert_eq!(opponent, "Lightning");
            assert_eq!(team_id.as_deref(), Some("Thunder-00aa11bb"));
            assert!(id.is_none());
        }
        _ => panic!("Expected game add"),
    }
}

#[test]
fn push_takes_a_path() {
    let cli = parse(&["ultisync", "game", "push", "game.json"]).unwrap();
    match cli.command {
        Command::Game(GameCommand::Push { file }) => assert_eq!(file, Path::new("game.json")),
        _ => panic!("Expected game push"),
    }
}

#[test]
fn push_accepts_stdin_marker() {
    let cli = parse(&["ultisync", "game", "push", "-"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Game(GameCommand::Push { file }) if file == Path::new("-")
    ));
}
