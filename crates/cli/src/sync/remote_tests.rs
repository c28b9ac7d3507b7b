// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the HTTP remote adapter.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yare::parameterized;

fn remote_for(server: &MockServer) -> HttpRemote {
    HttpRemote::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/players"))
        .and(body_json(json!({"id": "p1", "name": "Alex"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "name": "Alex"})))
        .expect(1)
        .mount(&server)
        .await;

    let value = remote_for(&server)
        .call(RemoteRequest::post(["players"], json!({"id": "p1", "name": "Alex"})))
        .await
        .unwrap();
    assert_eq!(value["id"], json!("p1"));
}

#[tokio::test]
async fn test_game_sync_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/games/2026-05-02-Thunder-vs-Lightning-143005/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = RemoteRequest::post(
        ["games", "2026-05-02-Thunder-vs-Lightning-143005", "sync"],
        json!({"team": "Thunder", "opponent": "Lightning"}),
    );
    remote_for(&server).call(request).await.unwrap();
}

#[tokio::test]
async fn test_base_url_with_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
        .expect(1)
        .mount(&server)
        .await;

    let remote = HttpRemote::new(&format!("{}/api/", server.uri()), Duration::from_secs(5)).unwrap();
    let value = remote.call(RemoteRequest::get(["teams"])).await.unwrap();
    assert_eq!(value, json!({"teams": []}));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/teams/t1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let value = remote_for(&server)
        .call(RemoteRequest::delete(["teams", "t1"]))
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn test_rejection_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/games/g1/sync"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Team and opponent are required"})),
        )
        .mount(&server)
        .await;

    let err = remote_for(&server)
        .call(RemoteRequest::post(["games", "g1", "sync"], json!({})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RemoteError::Rejected {
            status: 400,
            detail: "Team and opponent are required".into()
        }
    );
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn test_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Player not found"})))
        .mount(&server)
        .await;

    let err = remote_for(&server)
        .call(RemoteRequest::get(["players", "ghost"]))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_invalid_json_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = remote_for(&server)
        .call(RemoteRequest::get(["players"]))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::InvalidResponse(_)));
    assert!(err.was_accepted());
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn test_refused_connection_is_connectivity_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let remote = HttpRemote::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();

    let err = remote.call(RemoteRequest::get(["health"])).await.unwrap_err();
    assert!(err.is_connectivity(), "got {err:?}");
}

#[tokio::test]
async fn test_timeout_is_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"players": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let remote = HttpRemote::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = remote.call(RemoteRequest::get(["players"])).await.unwrap_err();
    assert!(err.is_connectivity(), "got {err:?}");
}

#[test]
fn test_invalid_base_url() {
    assert!(matches!(
        HttpRemote::new("not a url", Duration::from_secs(1)),
        Err(RemoteError::InvalidUrl(_))
    ));
}

#[parameterized(
    detail_string = { br#"{"detail":"Player not found"}"#.as_slice(), "Player not found" },
    detail_list = { br#"{"detail":[{"msg":"field required"}]}"#.as_slice(), r#"[{"msg":"field required"}]"# },
    plain_text = { b"Internal Server Error".as_slice(), "Internal Server Error" },
    empty = { b"".as_slice(), "Bad Gateway" },
)]
fn test_error_detail(body: &[u8], expected: &str) {
    assert_eq!(error_detail(body, Some("Bad Gateway")), expected);
}
