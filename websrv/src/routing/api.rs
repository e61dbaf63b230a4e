// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::{Filter, Reply, filters::BoxedFilter, http::StatusCode, hyper::body::Bytes};

use albums_backend_webapi_json as api;
use albums_core::EntityUid;
use albums_websrv_warp as websrv;

use super::SharedGatekeeper;

pub(crate) const REQUEST_BODY_LIMIT_BYTES: u64 = 64 * 1024;

pub(crate) fn create_filters(shared_gatekeeper: SharedGatekeeper) -> BoxedFilter<(impl Reply,)> {
    let shared_gatekeeper = warp::any().map(move || Arc::clone(&shared_gatekeeper));

    log::info!("Creating API routes");

    let path_param_uid = warp::path::param::<EntityUid>();

    let albums_path = warp::path("albums");

    // The path is matched before the method. Otherwise requests
    // for unknown paths would be rejected with 405 instead of 404.

    let albums_load_all = albums_path
        .and(warp::path::end())
        .and(warp::get())
        .and(shared_gatekeeper.clone())
        .and_then(|shared_gatekeeper: SharedGatekeeper| async move {
            websrv::run_read_task(&shared_gatekeeper, |repo| {
                api::album::load_all::handle_request(repo)
            })
            .await
            .map(|response_body| warp::reply::json(&response_body))
        });

    let albums_create = albums_path
        .and(warp::path::end())
        .and(warp::post())
        .and(websrv::request_body_bytes(REQUEST_BODY_LIMIT_BYTES))
        .and(shared_gatekeeper.clone())
        .and_then(
            |body: Bytes, shared_gatekeeper: SharedGatekeeper| async move {
                let request_body: api::album::create::RequestBody =
                    websrv::decode_json_body(&body).map_err(websrv::reject_on_error)?;
                websrv::run_write_task(&shared_gatekeeper, move |repo| {
                    api::album::create::handle_request(repo, request_body)
                })
                .await
                .map(|response_body| {
                    warp::reply::with_status(
                        warp::reply::json(&response_body),
                        StatusCode::CREATED,
                    )
                })
            },
        );

    let albums_load_one = albums_path
        .and(path_param_uid)
        .and(warp::path::end())
        .and(warp::get())
        .and(shared_gatekeeper.clone())
        .and_then(
            |uid: EntityUid, shared_gatekeeper: SharedGatekeeper| async move {
                websrv::run_read_task(&shared_gatekeeper, move |repo| {
                    api::album::load_one::handle_request(repo, &uid)
                })
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let albums_purge = albums_path
        .and(path_param_uid)
        .and(warp::path::end())
        .and(warp::delete())
        .and(shared_gatekeeper.clone())
        .and_then(
            |uid: EntityUid, shared_gatekeeper: SharedGatekeeper| async move {
                websrv::run_write_task(&shared_gatekeeper, move |repo| {
                    api::album::purge::handle_request(repo, &uid)
                })
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let albums_patch = albums_path
        .and(path_param_uid)
        .and(warp::path::end())
        .and(warp::patch())
        .and(websrv::request_body_bytes(REQUEST_BODY_LIMIT_BYTES))
        .and(shared_gatekeeper)
        .and_then(
            |uid: EntityUid, body: Bytes, shared_gatekeeper: SharedGatekeeper| async move {
                websrv::run_write_task(&shared_gatekeeper, move |repo| -> websrv::Result<_> {
                    // Unknown albums take precedence over malformed bodies
                    api::album::load_one::handle_request(&*repo, &uid)?;
                    let request_body: api::album::patch::RequestBody =
                        websrv::decode_json_body(&body)?;
                    api::album::patch::handle_request(repo, &uid, request_body).map_err(Into::into)
                })
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    albums_load_all
        .or(albums_create)
        .or(albums_load_one)
        .or(albums_purge)
        .or(albums_patch)
        .boxed()
}
