// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, fmt::Display, str::FromStr};

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if let Ok(rust_log_from_env) = env::var("RUST_LOG")
            && !rust_log_from_env.is_empty()
        {
            eprintln!("Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}");
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    let env_filter = create_env_filter();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    let subscriber = create_tracing_subscriber();
    set_global_default(subscriber)?;

    Ok(())
}

fn parse_bool_var(var: &str) -> Option<bool> {
    match var.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parse an optional, non-empty environment variable.
///
/// Invalid values are logged and ignored.
fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let var = env::var(name).ok()?;
    tracing::debug!("{name} = {var}");
    let trimmed = var.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse()
        .map_err(|err| {
            tracing::warn!("Failed to parse {name} = {var}: {err}");
        })
        .ok()
}

const DEFAULT_CONFIG_ENV: &str = "DEFAULT_CONFIG";

pub(crate) fn parse_default_config() -> Option<bool> {
    let var = env::var(DEFAULT_CONFIG_ENV).ok()?;
    tracing::debug!("{DEFAULT_CONFIG_ENV} = {var}");
    let value = parse_bool_var(&var);
    if value.is_none() {
        tracing::warn!("Failed to parse {DEFAULT_CONFIG_ENV} = {var}");
    }
    value
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

const ACQUIRE_READ_TIMEOUT_MILLIS_ENV: &str = "ACQUIRE_READ_TIMEOUT_MILLIS";

const ACQUIRE_WRITE_TIMEOUT_MILLIS_ENV: &str = "ACQUIRE_WRITE_TIMEOUT_MILLIS";

/// Override the configuration with environment variables.
pub(crate) fn parse_config_into(config: &mut Config) {
    let Config { network, storage } = config;
    if let Some(ip_addr) = parse_var(ENDPOINT_IP_ENV) {
        network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_var(ENDPOINT_PORT_ENV) {
        network.endpoint.port = port;
    }
    if let Some(timeout_millis) = parse_var(ACQUIRE_READ_TIMEOUT_MILLIS_ENV) {
        storage.acquire_read_timeout_millis = timeout_millis;
    }
    if let Some(timeout_millis) = parse_var(ACQUIRE_WRITE_TIMEOUT_MILLIS_ENV) {
        storage.acquire_write_timeout_millis = timeout_millis;
    }
}
