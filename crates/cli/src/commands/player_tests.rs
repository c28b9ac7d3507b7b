// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{offline, online, text};
use crate::sync::SyncError;
use serde_json::json;
use us_core::SyncAction;

fn number(n: &str) -> PlayerFields {
    PlayerFields {
        number: Some(n.into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn add_offline_prints_id_and_queues() {
    let t = offline();
    let mut out = Vec::new();

    add(&t.session, "Alex".into(), Some("alex-7".into()), number("7"), &mut out)
        .await
        .unwrap();

    assert_eq!(text(out), "alex-7\n");
    let stored = t.session.engine.players().load("alex-7").await.unwrap();
    assert!(stored.unconfirmed);
    assert_eq!(stored.entity.number.as_deref(), Some("7"));
    assert!(t.remote.calls().is_empty());
    assert_eq!(t.session.engine.pending()[0].action, SyncAction::Create);
}

#[tokio::test]
async fn add_derives_id_from_name() {
    let t = offline();
    let mut out = Vec::new();

    add(&t.session, "Alex".into(), None, PlayerFields::default(), &mut out)
        .await
        .unwrap();

    assert!(text(out).starts_with("Alex-"));
}

#[tokio::test]
async fn add_online_pushes_right_away() {
    let t = online();
    let mut out = Vec::new();

    add(&t.session, "Alex".into(), Some("p1".into()), PlayerFields::default(), &mut out)
        .await
        .unwrap();

    assert_eq!(t.remote.calls(), vec!["POST /players"]);
    assert!(t.session.engine.pending().is_empty());
    let stored = t.session.engine.players().load("p1").await.unwrap();
    assert!(!stored.unconfirmed);
}

#[tokio::test]
async fn edit_changes_only_given_fields() {
    let t = offline();
    let mut out = Vec::new();
    add(&t.session, "Alex".into(), Some("p1".into()), number("7"), &mut out)
        .await
        .unwrap();

    let mut out = Vec::new();
    let fields = PlayerFields {
        nickname: Some("Lefty".into()),
        ..Default::default()
    };
    edit(&t.session, "p1", Some("Alexis".into()), fields, &mut out)
        .await
        .unwrap();

    assert_eq!(text(out), "p1\n");
    let stored = t.session.engine.players().load("p1").await.unwrap().entity;
    assert_eq!(stored.name, "Alexis");
    assert_eq!(stored.nickname.as_deref(), Some("Lefty"));
    assert_eq!(stored.number.as_deref(), Some("7"));

    // Create and update for the same player collapse into one entry.
    let pending = t.session.engine.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].action, SyncAction::Update);
}

#[tokio::test]
async fn edit_without_changes_is_an_error() {
    let t = offline();
    let err = edit(&t.session, "p1", None, PlayerFields::default(), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NothingToChange));
}

#[tokio::test]
async fn edit_of_uncached_player_offline_fails() {
    let t = offline();
    let err = edit(&t.session, "p9", Some("Sam".into()), PlayerFields::default(), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Sync(SyncError::Offline { .. })));
}

#[tokio::test]
async fn edit_loads_remote_player_when_online() {
    let t = online();
    t.remote
        .respond("/players/p9", json!({"id": "p9", "name": "Sam", "number": 12}));

    edit(&t.session, "p9", None, number("13"), &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(t.remote.calls(), vec!["GET /players/p9", "POST /players"]);
    let body = t.remote.requests()[1].body.clone().unwrap();
    assert_eq!(body["name"], json!("Sam"));
    assert_eq!(body["number"], json!("13"));
}

#[tokio::test]
async fn list_text_marks_unsynced() {
    let t = offline();
    add(&t.session, "Alex".into(), Some("p1".into()), number("7"), &mut Vec::new())
        .await
        .unwrap();

    let mut out = Vec::new();
    run(&t.session, PlayerCommand::List { output: OutputFormat::Text }, &mut out)
        .await
        .unwrap();

    assert_eq!(text(out), "p1  Alex #7  [unsynced]\n");
}

#[tokio::test]
async fn show_json_includes_flag() {
    let t = offline();
    add(&t.session, "Alex".into(), Some("p1".into()), PlayerFields::default(), &mut Vec::new())
        .await
        .unwrap();

    let mut out = Vec::new();
    let command = PlayerCommand::Show {
        id: "p1".into(),
        output: OutputFormat::Json,
    };
    run(&t.session, command, &mut out).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&text(out)).unwrap();
    assert_eq!(value["name"], json!("Alex"));
    assert_eq!(value["unconfirmed"], json!(true));
}

#[tokio::test]
async fn rm_hides_player_and_queues_delete() {
    let t = offline();
    add(&t.session, "Alex".into(), Some("p1".into()), PlayerFields::default(), &mut Vec::new())
        .await
        .unwrap();

    let mut out = Vec::new();
    run(&t.session, PlayerCommand::Rm { id: "p1".into() }, &mut out)
        .await
        .unwrap();

    assert_eq!(text(out), "Deleted player p1\n");
    let pending = t.session.engine.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].action, SyncAction::Delete);
    assert!(t.session.engine.players().list().await.unwrap().is_empty());
}
