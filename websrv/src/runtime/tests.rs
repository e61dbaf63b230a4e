// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::Value;

use super::*;

#[tokio::test]
async fn about() {
    let config = Config::default();
    let launched_at = Timestamp::now();
    let filter = about_filter(about_json(&config, launched_at));
    let response = warp::test::request()
        .method("GET")
        .path("/about")
        .reply(&filter)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(Some(env!("CARGO_PKG_NAME")), body["name"].as_str());
    assert_eq!(Some(env!("CARGO_PKG_VERSION")), body["version"].as_str());
    assert_eq!(
        serde_json::to_value(config).unwrap(),
        body["instance"]["config"]
    );
    assert_eq!(
        serde_json::to_value(launched_at).unwrap(),
        body["instance"]["launched_at"]
    );
}

#[tokio::test]
async fn shutdown() {
    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel();
    let filter = shutdown_filter(server_shutdown_tx);
    let response = warp::test::request()
        .method("POST")
        .path("/shutdown")
        .reply(&filter)
        .await;
    assert_eq!(StatusCode::ACCEPTED, response.status());
    assert_eq!(Ok(()), server_shutdown_rx.try_recv());
}

#[tokio::test]
async fn shutdown_after_server_stopped() {
    let (server_shutdown_tx, server_shutdown_rx) = mpsc::unbounded_channel();
    drop(server_shutdown_rx);
    let filter = shutdown_filter(server_shutdown_tx);
    let response = warp::test::request()
        .method("POST")
        .path("/shutdown")
        .reply(&filter)
        .await;
    assert_eq!(StatusCode::BAD_GATEWAY, response.status());
}

#[tokio::test]
async fn shutdown_requires_post() {
    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel();
    let filter = shutdown_filter(server_shutdown_tx);
    let response = warp::test::request()
        .method("GET")
        .path("/shutdown")
        .reply(&filter)
        .await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, response.status());
    assert!(server_shutdown_rx.try_recv().is_err());
}
