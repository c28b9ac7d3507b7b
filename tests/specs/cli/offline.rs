// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box tests for running `ultisync` with the stats service unreachable.
//!
//! Every command must work from local state alone: writes are stored and
//! queued, reads come from the local cache, and nothing is lost between runs.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Nothing listens on the discard port, so every call is refused.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn us(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("ultisync");
    cmd.arg("--state-dir")
        .arg(temp.path())
        .env("ULTISTATS_API_URL", UNREACHABLE)
        .env_remove("RUST_LOG");
    cmd
}

fn add_player(temp: &TempDir, name: &str) -> String {
    let output = us(temp).args(["player", "add", name]).output().unwrap();
    assert!(output.status.success(), "player add failed: {:?}", output);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

// =============================================================================
// Writes
// =============================================================================

#[test]
fn add_prints_derived_id() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["player", "add", "Alex"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^Alex-[0-9a-f]{8}\n$").unwrap());
}

#[test]
fn add_with_explicit_id() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["player", "add", "Sam", "--id", "sam-1"])
        .assert()
        .success()
        .stdout("sam-1\n");
}

#[test]
fn writes_survive_between_runs() {
    let temp = TempDir::new().unwrap();
    let id = add_player(&temp, "Alex");

    us(&temp)
        .args(["player", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}  Alex  [unsynced]", id)));
}

#[test]
fn same_name_twice_gets_distinct_ids() {
    let temp = TempDir::new().unwrap();
    let first = add_player(&temp, "Alex");
    let second = add_player(&temp, "Alex");
    assert_ne!(first, second);
}

#[test]
fn rm_hides_the_record() {
    let temp = TempDir::new().unwrap();
    let id = add_player(&temp, "Alex");

    us(&temp)
        .args(["player", "rm", &id])
        .assert()
        .success()
        .stdout(format!("Deleted player {}\n", id));

    us(&temp)
        .args(["player", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    us(&temp)
        .args(["player", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// =============================================================================
// Reads
// =============================================================================

#[test]
fn show_of_uncached_id_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["team", "show", "t-unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: team t-unknown is not available offline"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn list_with_nothing_stored_is_empty() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .args(["game", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// =============================================================================
// Status and sync
// =============================================================================

#[test]
fn status_counts_pending_by_kind() {
    let temp = TempDir::new().unwrap();
    add_player(&temp, "Alex");
    us(&temp).args(["team", "add", "Thunder"]).assert().success();

    us(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout("offline\npending: 2 (player 1, team 1)\n");
}

#[test]
fn status_of_fresh_state_is_synced() {
    let temp = TempDir::new().unwrap();
    us(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout("offline\nall changes synced\n");
}

#[test]
fn delete_of_unsynced_record_stays_queued() {
    let temp = TempDir::new().unwrap();
    let id = add_player(&temp, "Alex");
    us(&temp).args(["player", "rm", &id]).assert().success();

    us(&temp)
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"player\": 1"))
        .stdout(predicate::str::contains("\"online\": false"));
}

#[test]
fn sync_sends_nothing_while_offline() {
    let temp = TempDir::new().unwrap();
    add_player(&temp, "Alex");

    us(&temp)
        .arg("sync")
        .assert()
        .success()
        .stdout("offline, nothing sent: 0 confirmed, 0 rejected, 1 remaining\n");
}
