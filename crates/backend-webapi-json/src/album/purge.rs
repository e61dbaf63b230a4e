// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use albums_usecases::album as uc;

use super::*;

/// The purged album.
pub type ResponseBody = Entity;

pub fn handle_request(repo: &mut impl EntityRepo, uid: &EntityUid) -> Result<ResponseBody> {
    uc::purge(repo, uid).map(Into::into).map_err(Into::into)
}
