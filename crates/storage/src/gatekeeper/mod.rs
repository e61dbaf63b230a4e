// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{sync::RwLock, time::timeout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Manage access to a shared repository for asynchronous tasks
///
/// Any number of readers or a single writer are allowed to access
/// the repository at any given time. Each task holds its guard
/// for the whole duration of the task, i.e. a lookup followed by
/// a modification is never interleaved with another write task.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper<R> {
    repo: RwLock<R>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    request_counter_state: Arc<RequestCounterState>,
    decommissioned: AtomicBool,
}

#[derive(Debug, Default)]
struct RequestCounterState {
    read_count: AtomicUsize,
    write_count: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestCounterMode {
    Read,
    Write,
}

struct RequestCounterScope {
    shared_state: Arc<RequestCounterState>,
    mode: RequestCounterMode,
}

impl RequestCounterScope {
    #[must_use]
    fn new(shared_state: Arc<RequestCounterState>, mode: RequestCounterMode) -> Self {
        match mode {
            RequestCounterMode::Read => {
                let pending_read_requests_before =
                    shared_state.read_count.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "Starting read request: {} pending read request(s)",
                    pending_read_requests_before + 1
                );
            }
            RequestCounterMode::Write => {
                let pending_write_requests_before =
                    shared_state.write_count.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "Starting write request: {} pending write request(s)",
                    pending_write_requests_before + 1
                );
            }
        }
        Self { shared_state, mode }
    }
}

impl Drop for RequestCounterScope {
    fn drop(&mut self) {
        match self.mode {
            RequestCounterMode::Read => {
                let pending_read_requests_before =
                    self.shared_state.read_count.fetch_sub(1, Ordering::Relaxed);
                debug_assert!(pending_read_requests_before > 0);
                log::debug!(
                    "Finished read request: {} pending read request(s)",
                    pending_read_requests_before - 1
                );
            }
            RequestCounterMode::Write => {
                let pending_write_requests_before = self
                    .shared_state
                    .write_count
                    .fetch_sub(1, Ordering::Relaxed);
                debug_assert!(pending_write_requests_before > 0);
                log::debug!(
                    "Finished write request: {} pending write request(s)",
                    pending_write_requests_before - 1
                );
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTasks {
    pub read: usize,
    pub write: usize,
}

impl<R> Gatekeeper<R> {
    #[must_use]
    pub fn new(repo: R, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        let acquire_read_timeout = Duration::from_millis(acquire_read_timeout_millis.get());
        let acquire_write_timeout = Duration::from_millis(acquire_write_timeout_millis.get());
        Self {
            repo: RwLock::new(repo),
            acquire_read_timeout,
            acquire_write_timeout,
            request_counter_state: Default::default(),
            decommissioned: AtomicBool::new(false),
        }
    }

    /// Reject all subsequent tasks.
    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.decommissioned.load(Ordering::Acquire) {
            return Err(Error::Decommissioned);
        }
        Ok(())
    }

    /// Run a task with shared access to the repository.
    pub async fn run_read_task<H, T>(&self, handler: H) -> Result<T>
    where
        H: FnOnce(&R) -> T,
    {
        self.check_not_decommissioned()?;
        let _request_counter_scope = RequestCounterScope::new(
            Arc::clone(&self.request_counter_state),
            RequestCounterMode::Read,
        );
        let guard = timeout(self.acquire_read_timeout, self.repo.read())
            .await
            .map_err(|_| Error::TaskTimeout {
                reason: "repository is locked".to_string(),
            })?;
        self.check_not_decommissioned()?;
        Ok(handler(&guard))
    }

    /// Run a task with exclusive access to the repository.
    pub async fn run_write_task<H, T>(&self, handler: H) -> Result<T>
    where
        H: FnOnce(&mut R) -> T,
    {
        self.check_not_decommissioned()?;
        let _request_counter_scope = RequestCounterScope::new(
            Arc::clone(&self.request_counter_state),
            RequestCounterMode::Write,
        );
        let mut guard = timeout(self.acquire_write_timeout, self.repo.write())
            .await
            .map_err(|_| Error::TaskTimeout {
                reason: "repository is locked".to_string(),
            })?;
        self.check_not_decommissioned()?;
        Ok(handler(&mut guard))
    }

    #[must_use]
    pub fn pending_tasks(&self) -> PendingTasks {
        PendingTasks {
            read: self
                .request_counter_state
                .read_count
                .load(Ordering::Relaxed),
            write: self
                .request_counter_state
                .write_count
                .load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}

const DEFAULT_ACQUIRE_READ_TIMEOUT_MILLIS: NonZeroU64 = NonZeroU64::new(10_000).unwrap();

const DEFAULT_ACQUIRE_WRITE_TIMEOUT_MILLIS: NonZeroU64 = NonZeroU64::new(30_000).unwrap();

impl Default for Config {
    fn default() -> Self {
        Self {
            acquire_read_timeout_millis: DEFAULT_ACQUIRE_READ_TIMEOUT_MILLIS,
            acquire_write_timeout_millis: DEFAULT_ACQUIRE_WRITE_TIMEOUT_MILLIS,
        }
    }
}

#[cfg(test)]
mod tests;
