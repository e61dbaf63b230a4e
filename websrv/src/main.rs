// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env::current_exe, fs, path::PathBuf};

use directories::ProjectDirs;
use tokio::{signal, sync::mpsc};

use crate::{
    config::Config,
    runtime::{Command as RuntimeCommand, State as RuntimeState},
};

mod config;
mod env;
mod routing;
mod runtime;

#[must_use]
fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

#[must_use]
fn app_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "albums", app_name())
}

#[must_use]
fn config_file_path(app_dirs: &ProjectDirs) -> PathBuf {
    let mut path_buf = app_dirs.config_dir().to_path_buf();
    path_buf.push("config");
    path_buf.set_extension("ron");
    path_buf
}

#[must_use]
fn load_app_config(app_dirs: &ProjectDirs) -> Config {
    let file_path = config_file_path(app_dirs);
    log::info!("Loading configuration from file: {}", file_path.display());
    match fs::read(&file_path) {
        Ok(bytes) => ron::de::from_bytes(&bytes)
            .map_err(|err| {
                log::warn!("Failed to parse configuration data: {err}");
            })
            .unwrap_or_default(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::info!("Configuration file not found");
            Default::default()
        }
        Err(err) => {
            log::warn!("Failed to read configuration data from file: {err}");
            Default::default()
        }
    }
}

async fn run_headless(config: Config) -> anyhow::Result<()> {
    log::info!("Running headless");

    let (runtime_command_tx, runtime_command_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {err}");
            return;
        }
        log::info!("Received Ctrl-C");
        if runtime_command_tx.send(RuntimeCommand::Terminate).is_err() {
            log::debug!("Runtime has already terminated");
        }
    });

    let current_state_pub = discro::Publisher::new(None);
    let mut current_state_sub = current_state_pub.subscribe();
    tokio::spawn(async move {
        while current_state_sub.changed().await.is_ok() {
            let current_state = *current_state_sub.read_ack();
            if let Some(RuntimeState::Listening { socket_addr }) = current_state {
                // Publish socket address on stdout
                println!("{socket_addr}");
            }
        }
    });

    runtime::run(config, runtime_command_rx, current_state_pub).await
}

fn main() {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return;
    }

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = if env::parse_default_config().unwrap_or(false) {
        log::info!("Using default configuration");
        Config::default()
    } else {
        app_dirs()
            .as_ref()
            .map(load_app_config)
            .unwrap_or_default()
    };

    log::info!("Patching configuration from .env file and environment variables");
    env::parse_config_into(&mut config);
    log::info!("Configuration: {config:?}");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("Failed to create runtime: {err}");
            return;
        }
    };

    if let Err(err) = runtime.block_on(run_headless(config)) {
        log::error!("Runtime terminated with error: {err}");
    }

    log::info!("Exiting");
}
