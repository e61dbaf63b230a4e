// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{net::SocketAddr, sync::Arc};

use jiff::Timestamp;
use tokio::sync::mpsc;
use warp::{Filter, Reply, filters::BoxedFilter, http::StatusCode};

use albums_repo::{album::seed_entities, memory::InMemoryRepo};
use albums_storage::gatekeeper::{Gatekeeper, PendingTasks};
use albums_websrv_warp::handle_rejection;

use crate::{
    config::{Config, StorageConfig},
    routing::{self, ENDPOINTS, SharedGatekeeper},
};

const ACCESS_LOG_TARGET: &str = "albums_websrv::access";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Launching,
    Starting,
    Listening { socket_addr: SocketAddr },
    Stopping,
    Terminating,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Command {
    Terminate,
}

fn provision_storage(config: StorageConfig) -> SharedGatekeeper {
    let albums = seed_entities();
    log::info!(
        "Commissioning in-memory storage with {count} album(s)",
        count = albums.len(),
    );
    let repo = InMemoryRepo::with_albums(albums);
    Arc::new(Gatekeeper::new(repo, config))
}

fn log_endpoints(socket_addr: SocketAddr) {
    log::info!("Available endpoints:");
    for (method, path, summary) in ENDPOINTS {
        log::info!("  {method:<6} http://{socket_addr}{path} - {summary}");
    }
}

fn about_json(config: &Config, launched_at: Timestamp) -> serde_json::Value {
    serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance": {
            "launched_at": launched_at,
            "config": config,
        },
    })
}

// GET /about
fn about_filter(about_json: serde_json::Value) -> BoxedFilter<(impl Reply,)> {
    warp::path("about")
        .and(warp::path::end())
        .and(warp::get())
        .map(move || warp::reply::json(&about_json))
        .boxed()
}

// POST /shutdown
fn shutdown_filter(server_shutdown_tx: mpsc::UnboundedSender<()>) -> BoxedFilter<(impl Reply,)> {
    warp::path("shutdown")
        .and(warp::path::end())
        .and(warp::post())
        .map(move || {
            server_shutdown_tx
                .send(())
                .map(|()| StatusCode::ACCEPTED)
                .map_err(|_| {
                    log::warn!("Failed to forward shutdown request");
                    StatusCode::BAD_GATEWAY
                })
        })
        .boxed()
}

pub(crate) async fn run(
    config: Config,
    command_rx: mpsc::UnboundedReceiver<Command>,
    current_state_tx: discro::Publisher<Option<State>>,
) -> anyhow::Result<()> {
    let launched_at = Timestamp::now();

    log::info!("Launching");
    current_state_tx.write(Some(State::Launching));

    let shared_gatekeeper = provision_storage(config.storage);

    log::info!("Creating service routes");

    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel::<()>();
    let all_filters = routing::create_filters(Arc::clone(&shared_gatekeeper))
        .or(shutdown_filter(server_shutdown_tx))
        .or(about_filter(about_json(&config, launched_at)));

    log::info!("Initializing server");

    let server = warp::serve(
        all_filters
            .recover(handle_rejection)
            .with(warp::cors().allow_any_origin())
            .with(warp::log(ACCESS_LOG_TARGET)),
    );

    log::info!("Starting");
    current_state_tx.write(Some(State::Starting));

    let (socket_addr, server_listener) = {
        let mut command_rx = command_rx;
        server.try_bind_with_graceful_shutdown(config.network.endpoint.socket_addr(), async move {
            tokio::select! {
                Some(()) = server_shutdown_rx.recv() => {
                    log::info!("Shutdown requested");
                }
                Some(Command::Terminate) = command_rx.recv() => {
                    log::info!("Termination requested");
                }
                else => (),
            }
        })?
    };

    log::info!("Listening on {socket_addr}");
    log_endpoints(socket_addr);
    current_state_tx.write(Some(State::Listening { socket_addr }));

    server_listener.await;

    log::info!("Stopping");
    current_state_tx.write(Some(State::Stopping));

    shared_gatekeeper.decommission();
    let PendingTasks { read, write } = shared_gatekeeper.pending_tasks();
    if read > 0 || write > 0 {
        log::warn!("Decommissioned storage with {read} pending read and {write} pending write task(s)");
    }

    log::info!("Terminating");
    current_state_tx.write(Some(State::Terminating));

    Ok(())
}

#[cfg(test)]
mod tests;
