// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box tests for the `ultisync player`, `team` and `game` commands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

fn us(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("ultisync");
    cmd.arg("--state-dir")
        .arg(temp.path())
        .env("ULTISTATS_API_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG");
    cmd
}

fn run_ok(temp: &TempDir, args: &[&str]) -> String {
    let output = us(temp).args(args).output().unwrap();
    assert!(output.status.success(), "{:?} failed: {:?}", args, output);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

// =============================================================================
// Players
// =============================================================================

#[test]
fn player_show_lists_attributes() {
    let temp = TempDir::new().unwrap();
    let id = run_ok(
        &temp,
        &["player", "add", "Alex", "--nickname", "Lefty", "--number", "7", "--gender", "FMP"],
    );

    us(&temp)
        .args(["player", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}  Alex #7 \"Lefty\"  [unsynced]", id)))
        .stdout(predicate::str::contains("Gender: FMP"))
        .stdout(predicate::str::contains("Created: "));
}

#[test]
fn player_edit_changes_given_fields() {
    let temp = TempDir::new().unwrap();
    let id = run_ok(&temp, &["player", "add", "Alex", "--number", "7"]);

    us(&temp)
        .args(["player", "edit", &id, "--name", "Alexis", "--number", ""])
        .assert()
        .success()
        .stdout(format!("{}\n", id));

    us(&temp)
        .args(["player", "list"])
        .assert()
        .success()
        .stdout(format!("{}  Alexis  [unsynced]\n", id));
}

#[test]
fn player_edit_without_fields_fails() {
    let temp = TempDir::new().unwrap();
    let id = run_ok(&temp, &["player", "add", "Alex"]);

    us(&temp)
        .args(["player", "edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn player_show_json() {
    let temp = TempDir::new().unwrap();
    run_ok(&temp, &["player", "add", "Alex", "--id", "p1", "--number", "7"]);

    let stdout = run_ok(&temp, &["player", "show", "p1", "-o", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["id"], "p1");
    assert_eq!(value["number"], "7");
    assert_eq!(value["unconfirmed"], true);
    assert!(value["createdAt"].is_string());
}

#[parameterized(
    empty = { "" },
    blank = { "   " },
)]
fn player_add_rejects_blank_name(name: &str) {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["player", "add", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

// =============================================================================
// Teams
// =============================================================================

#[test]
fn team_roster_round_trip() {
    let temp = TempDir::new().unwrap();
    let alex = run_ok(&temp, &["player", "add", "Alex"]);
    let sam = run_ok(&temp, &["player", "add", "Sam"]);
    let team = run_ok(&temp, &["team", "add", "Thunder", "-p", &alex, "-p", &sam]);

    us(&temp)
        .args(["team", "show", &team])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thunder (2 players)"))
        .stdout(predicate::str::contains(format!("Roster:\n  {}\n  {}", alex, sam)));

    run_ok(&temp, &["team", "edit", &team, "-p", &sam]);
    us(&temp)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thunder (1 players)"));
}

// =============================================================================
// Games
// =============================================================================

#[test]
fn game_add_derives_id_from_sides() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["game", "add", "--team", "Thunder", "--opponent", "Lightning"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r"^\d{4}-\d{2}-\d{2}-Thunder-vs-Lightning-\d{6}\n$").unwrap(),
        );
}

#[test]
fn game_push_stores_full_graph() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("game.json");
    std::fs::write(
        &file,
        r#"{
            "id": "g1",
            "team": "Thunder",
            "opponent": "Lightning",
            "scores": {"team": 1, "opponent": 0},
            "points": [{"possessions": [{"events": [{"type": "Score"}]}]}]
        }"#,
    )
    .unwrap();

    us(&temp)
        .args(["game", "push"])
        .arg(&file)
        .assert()
        .success()
        .stdout("g1\n");

    us(&temp)
        .args(["game", "show", "g1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("g1  Thunder vs Lightning  1-0  [unsynced]"))
        .stdout(predicate::str::contains("Points: 1 (1 possessions)"));

    us(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("pending: 1 (game 1)"));
}

#[test]
fn game_push_from_stdin() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["game", "push", "-"])
        .write_stdin(r#"{"id": "g2", "team": "Thunder", "opponent": "Lightning"}"#)
        .assert()
        .success()
        .stdout("g2\n");
}

#[test]
fn game_push_of_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["game", "push"])
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"))
        .stderr(predicate::str::contains("missing.json"));
}
