// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::{Value, json};
use warp::{Filter as _, http::StatusCode, test::RequestBuilder};

use albums_repo::album::seed_entities;
use albums_storage::gatekeeper::Config as GatekeeperConfig;
use albums_websrv_warp::handle_rejection;

use super::*;

const BLUE_TRAIN_UID: &str = "550e8400-e29b-41d4-a716-446655440001";
const JERU_UID: &str = "550e8400-e29b-41d4-a716-446655440002";

fn seeded_gatekeeper() -> SharedGatekeeper {
    Arc::new(Gatekeeper::new(
        InMemoryRepo::with_albums(seed_entities()),
        GatekeeperConfig::default(),
    ))
}

async fn reply(
    shared_gatekeeper: &SharedGatekeeper,
    request: RequestBuilder,
) -> (StatusCode, Value) {
    let filters = create_filters(Arc::clone(shared_gatekeeper)).recover(handle_rejection);
    let response = request.reply(&filters).await;
    let body = if response.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(response.body()).unwrap()
    };
    (response.status(), body)
}

fn get(path: &str) -> RequestBuilder {
    warp::test::request().method("GET").path(path)
}

fn delete(path: &str) -> RequestBuilder {
    warp::test::request().method("DELETE").path(path)
}

fn post_json(path: &str, body: &Value) -> RequestBuilder {
    warp::test::request().method("POST").path(path).json(body)
}

fn patch_json(path: &str, body: &Value) -> RequestBuilder {
    warp::test::request().method("PATCH").path(path).json(body)
}

#[tokio::test]
async fn health() {
    let gatekeeper = seeded_gatekeeper();
    let (code, body) = reply(&gatekeeper, get("/")).await;
    assert_eq!(StatusCode::OK, code);
    assert_eq!(
        json!({
            "status": "healthy",
            "service": "album-api",
            "version": env!("CARGO_PKG_VERSION"),
        }),
        body
    );
}

#[tokio::test]
async fn list_seeded_albums_in_order() {
    let gatekeeper = seeded_gatekeeper();
    let (code, body) = reply(&gatekeeper, get("/albums")).await;
    assert_eq!(StatusCode::OK, code);
    assert_eq!(
        json!([
            {
                "id": BLUE_TRAIN_UID,
                "title": "Blue Train",
                "artist": "John Coltrane",
                "price": 56.99,
            },
            {
                "id": JERU_UID,
                "title": "Jeru",
                "artist": "Gerry Mulligan",
                "price": 17.99,
            },
            {
                "id": "550e8400-e29b-41d4-a716-446655440003",
                "title": "Sarah Vaughan and Clifford Brown",
                "artist": "Sarah Vaughan",
                "price": 39.99,
            },
        ]),
        body
    );
}

#[tokio::test]
async fn end_to_end_scenario() {
    let gatekeeper = seeded_gatekeeper();

    // Create
    let (code, created) = reply(
        &gatekeeper,
        post_json(
            "/albums",
            &json!({
                "id": "ignored",
                "title": "Kind of Blue",
                "artist": "Miles Davis",
                "price": 49.99,
            }),
        ),
    )
    .await;
    assert_eq!(StatusCode::CREATED, code);
    let created_id = created["id"].as_str().unwrap().to_owned();
    assert!(!created_id.is_empty());
    assert_ne!("ignored", created_id);
    assert_eq!(Some("Kind of Blue"), created["title"].as_str());
    assert_eq!(Some("Miles Davis"), created["artist"].as_str());
    assert_eq!(Some(49.99), created["price"].as_f64());
    let (code, loaded) = reply(&gatekeeper, get(&format!("/albums/{created_id}"))).await;
    assert_eq!(StatusCode::OK, code);
    assert_eq!(created, loaded);

    // Reject invalid input
    let (code, body) = reply(&gatekeeper, post_json("/albums", &json!({ "title": "A" }))).await;
    assert_eq!(StatusCode::BAD_REQUEST, code);
    assert_eq!(
        json!({ "error": "Title must be between 2 and 100 characters" }),
        body
    );

    // Delete
    let blue_train_path = format!("/albums/{BLUE_TRAIN_UID}");
    let (code, deleted) = reply(&gatekeeper, delete(&blue_train_path)).await;
    assert_eq!(StatusCode::OK, code);
    assert_eq!(Some("Blue Train"), deleted["title"].as_str());
    let (code, body) = reply(&gatekeeper, get(&blue_train_path)).await;
    assert_eq!(StatusCode::NOT_FOUND, code);
    assert_eq!(json!({ "message": "album not found" }), body);

    // Patch
    let jeru_path = format!("/albums/{JERU_UID}");
    let (code, patched) = reply(
        &gatekeeper,
        patch_json(&jeru_path, &json!({ "title": "Updated Title" })),
    )
    .await;
    assert_eq!(StatusCode::OK, code);
    assert_eq!(
        json!({
            "id": JERU_UID,
            "title": "Updated Title",
            "artist": "Gerry Mulligan",
            "price": 17.99,
        }),
        patched
    );

    let (code, body) = reply(&gatekeeper, get("/albums")).await;
    assert_eq!(StatusCode::OK, code);
    let titles = body
        .as_array()
        .unwrap()
        .iter()
        .map(|album| album["title"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            "Updated Title",
            "Sarah Vaughan and Clifford Brown",
            "Kind of Blue"
        ],
        titles
    );
}

#[tokio::test]
async fn unknown_id_not_found() {
    let gatekeeper = seeded_gatekeeper();
    let path = "/albums/not-found";
    for request in [
        get(path),
        delete(path),
        patch_json(path, &json!({ "title": "Updated Title" })),
    ] {
        let (code, body) = reply(&gatekeeper, request).await;
        assert_eq!(StatusCode::NOT_FOUND, code);
        assert_eq!(json!({ "message": "album not found" }), body);
    }
}

#[tokio::test]
async fn empty_patch_leaves_album_unmodified() {
    let gatekeeper = seeded_gatekeeper();
    let path = format!("/albums/{JERU_UID}");
    let (_, before) = reply(&gatekeeper, get(&path)).await;
    let (code, patched) = reply(
        &gatekeeper,
        patch_json(&path, &json!({ "title": "", "price": 0 })),
    )
    .await;
    assert_eq!(StatusCode::OK, code);
    assert_eq!(before, patched);
}

#[tokio::test]
async fn invalid_patch_leaves_album_unmodified() {
    let gatekeeper = seeded_gatekeeper();
    let path = format!("/albums/{JERU_UID}");
    let (_, before) = reply(&gatekeeper, get(&path)).await;
    let (code, body) = reply(
        &gatekeeper,
        patch_json(&path, &json!({ "title": "A", "price": 99.99 })),
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, code);
    assert_eq!(
        json!({ "error": "Title must be between 2 and 100 characters" }),
        body
    );
    let (_, after) = reply(&gatekeeper, get(&path)).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn malformed_json() {
    let gatekeeper = seeded_gatekeeper();
    for request in [
        warp::test::request()
            .method("POST")
            .path("/albums")
            .body("{\"title\":"),
        post_json("/albums", &json!({ "title": "Kind of Blue", "price": "cheap" })),
        warp::test::request()
            .method("PATCH")
            .path(&format!("/albums/{JERU_UID}"))
            .body("not json"),
    ] {
        let (code, body) = reply(&gatekeeper, request).await;
        assert_eq!(StatusCode::BAD_REQUEST, code);
        assert_eq!(Some("Invalid JSON"), body["error"].as_str());
        assert!(body["details"].is_string());
    }
    let (_, body) = reply(&gatekeeper, get("/albums")).await;
    assert_eq!(3, body.as_array().unwrap().len());
}

#[tokio::test]
async fn reject_non_object_bodies() {
    let gatekeeper = seeded_gatekeeper();
    for request in [
        post_json("/albums", &json!(["Kind of Blue", "Miles Davis", 49.99])),
        patch_json(&format!("/albums/{JERU_UID}"), &json!([])),
        post_json("/albums", &json!({ "id": 5, "title": "Kind of Blue" })),
    ] {
        let (code, body) = reply(&gatekeeper, request).await;
        assert_eq!(StatusCode::BAD_REQUEST, code);
        assert_eq!(Some("Invalid JSON"), body["error"].as_str());
    }
    let (_, body) = reply(&gatekeeper, get("/albums")).await;
    assert_eq!(3, body.as_array().unwrap().len());
    let (_, body) = reply(&gatekeeper, get(&format!("/albums/{JERU_UID}"))).await;
    assert_eq!(Some("Jeru"), body["title"].as_str());
}

#[tokio::test]
async fn missing_body_is_invalid_json() {
    let gatekeeper = seeded_gatekeeper();
    for request in [
        warp::test::request().method("POST").path("/albums"),
        warp::test::request()
            .method("PATCH")
            .path(&format!("/albums/{JERU_UID}")),
    ] {
        let (code, body) = reply(&gatekeeper, request).await;
        assert_eq!(StatusCode::BAD_REQUEST, code);
        assert_eq!(Some("Invalid JSON"), body["error"].as_str());
        assert!(body["details"].is_string());
    }
}

#[tokio::test]
async fn ignore_content_type() {
    let gatekeeper = seeded_gatekeeper();
    let (code, created) = reply(
        &gatekeeper,
        warp::test::request()
            .method("POST")
            .path("/albums")
            .header("content-type", "text/plain")
            .body(r#"{"title":"Kind of Blue","artist":"Miles Davis","price":49.99}"#),
    )
    .await;
    assert_eq!(StatusCode::CREATED, code);
    assert_eq!(Some("Kind of Blue"), created["title"].as_str());
}

#[tokio::test]
async fn patch_unknown_id_before_decoding_body() {
    let gatekeeper = seeded_gatekeeper();
    let (code, body) = reply(
        &gatekeeper,
        warp::test::request()
            .method("PATCH")
            .path("/albums/not-found")
            .body("not json"),
    )
    .await;
    assert_eq!(StatusCode::NOT_FOUND, code);
    assert_eq!(json!({ "message": "album not found" }), body);
}

#[tokio::test]
async fn payload_too_large() {
    let gatekeeper = seeded_gatekeeper();
    let title = "x".repeat(usize::try_from(api::REQUEST_BODY_LIMIT_BYTES).unwrap());
    let (code, _) = reply(
        &gatekeeper,
        post_json("/albums", &json!({ "title": title })),
    )
    .await;
    assert_eq!(StatusCode::PAYLOAD_TOO_LARGE, code);
    let (_, body) = reply(&gatekeeper, get("/albums")).await;
    assert_eq!(3, body.as_array().unwrap().len());
}

#[tokio::test]
async fn unknown_route_not_found() {
    let gatekeeper = seeded_gatekeeper();
    let (code, body) = reply(&gatekeeper, get("/tracks")).await;
    assert_eq!(StatusCode::NOT_FOUND, code);
    assert_eq!(json!({ "message": "Not Found" }), body);
}

#[tokio::test]
async fn method_not_allowed() {
    let gatekeeper = seeded_gatekeeper();
    let (code, body) = reply(
        &gatekeeper,
        warp::test::request().method("PUT").path("/albums"),
    )
    .await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, code);
    assert!(body["message"].is_string());
}
