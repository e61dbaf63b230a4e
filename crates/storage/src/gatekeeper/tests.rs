// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn short_timeout_config() -> Config {
    Config {
        acquire_read_timeout_millis: NonZeroU64::new(10).unwrap(),
        acquire_write_timeout_millis: NonZeroU64::new(10).unwrap(),
    }
}

#[tokio::test]
async fn read_and_write() {
    let gatekeeper = Gatekeeper::new(vec![1, 2], Config::default());
    gatekeeper
        .run_write_task(|items: &mut Vec<i32>| items.push(3))
        .await
        .unwrap();
    let items = gatekeeper
        .run_read_task(|items: &Vec<i32>| items.clone())
        .await
        .unwrap();
    assert_eq!(vec![1, 2, 3], items);
    assert_eq!(PendingTasks { read: 0, write: 0 }, gatekeeper.pending_tasks());
}

#[tokio::test]
async fn timeout_while_locked_for_writing() {
    let gatekeeper = Gatekeeper::new(0, short_timeout_config());
    let guard = gatekeeper.repo.write().await;
    assert!(matches!(
        gatekeeper.run_read_task(|value| *value).await,
        Err(Error::TaskTimeout { .. })
    ));
    assert!(matches!(
        gatekeeper.run_write_task(|value| *value += 1).await,
        Err(Error::TaskTimeout { .. })
    ));
    drop(guard);
    assert_eq!(0, gatekeeper.run_read_task(|value| *value).await.unwrap());
    assert_eq!(PendingTasks { read: 0, write: 0 }, gatekeeper.pending_tasks());
}

#[tokio::test]
async fn concurrent_readers() {
    let gatekeeper = Gatekeeper::new(42, short_timeout_config());
    let guard = gatekeeper.repo.read().await;
    assert_eq!(42, gatekeeper.run_read_task(|value| *value).await.unwrap());
    drop(guard);
}

#[tokio::test]
async fn reject_tasks_after_decommissioning() {
    let gatekeeper = Gatekeeper::new(0, Config::default());
    gatekeeper.decommission();
    assert!(matches!(
        gatekeeper.run_read_task(|value| *value).await,
        Err(Error::Decommissioned)
    ));
    assert!(matches!(
        gatekeeper.run_write_task(|value| *value += 1).await,
        Err(Error::Decommissioned)
    ));
}

#[test]
fn default_config() {
    let config = Config::default();
    assert_eq!(10_000, config.acquire_read_timeout_millis.get());
    assert_eq!(30_000, config.acquire_write_timeout_millis.get());
}
