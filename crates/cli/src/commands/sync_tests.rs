// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{offline, online, text};
use serde_json::json;
use us_core::{Player, Team};

#[tokio::test]
async fn offline_sync_sends_nothing() {
    let t = offline();
    t.session.engine.players().create_offline(Player::new("Alex")).unwrap();

    let mut out = Vec::new();
    run(&t.session, OutputFormat::Text, &mut out).await.unwrap();

    assert_eq!(text(out), "offline, nothing sent: 0 confirmed, 0 rejected, 1 remaining\n");
    assert!(t.remote.calls().is_empty());
}

#[tokio::test]
async fn empty_queue() {
    let t = online();
    let mut out = Vec::new();
    run(&t.session, OutputFormat::Text, &mut out).await.unwrap();
    assert_eq!(text(out), "nothing to sync\n");
}

#[tokio::test]
async fn online_sync_reports_per_item_results() {
    let t = offline();
    t.session.engine.players().create_offline(Player::new("Alex")).unwrap();
    t.session.engine.teams().create_offline(Team::new("Thunder")).unwrap();
    t.session.engine.set_online(true);
    t.remote.push_ok();
    t.remote.push_rejected(422, "roster is invalid");

    let mut out = Vec::new();
    run(&t.session, OutputFormat::Json, &mut out).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&text(out)).unwrap();
    assert_eq!(value["outcome"], json!("completed"));
    assert_eq!(value["confirmed"], json!(1));
    assert_eq!(value["rejected"], json!(1));
    assert_eq!(value["remaining"], json!(1));
}
