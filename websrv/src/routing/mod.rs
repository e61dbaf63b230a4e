// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::{Filter as _, Reply, filters::BoxedFilter};

use albums_repo::memory::InMemoryRepo;
use albums_storage::gatekeeper::Gatekeeper;

pub(crate) mod api;

pub(crate) type SharedGatekeeper = Arc<Gatekeeper<InMemoryRepo>>;

const SERVICE_NAME: &str = "album-api";

/// Method, path, and summary of all routes.
pub(crate) const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/", "Health check"),
    ("GET", "/albums", "List all albums"),
    ("POST", "/albums", "Create an album"),
    ("GET", "/albums/{id}", "Get an album"),
    ("PATCH", "/albums/{id}", "Modify an album"),
    ("DELETE", "/albums/{id}", "Delete an album"),
    ("GET", "/about", "Server information"),
    ("POST", "/shutdown", "Shut down the server"),
];

// GET /
fn health_filter() -> BoxedFilter<(impl Reply,)> {
    warp::path::end()
        .and(warp::get())
        .map(|| {
            warp::reply::json(&serde_json::json!({
                "status": "healthy",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }))
        })
        .boxed()
}

pub(crate) fn create_filters(shared_gatekeeper: SharedGatekeeper) -> BoxedFilter<(impl Reply,)> {
    health_filter()
        .or(api::create_filters(shared_gatekeeper))
        .boxed()
}

#[cfg(test)]
mod tests;
