// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use albums_core::EntityUid;

use albums_core_json::album::{Album, Entity};

use albums_repo::album::EntityRepo;

use super::*;

pub mod create;
pub mod load_all;
pub mod load_one;
pub mod patch;
pub mod purge;
