// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use albums_usecases::album as uc;

use super::*;

/// Empty strings and non-positive prices are ignored.
pub type RequestBody = Album;

pub type ResponseBody = Entity;

pub fn handle_request(
    repo: &mut impl EntityRepo,
    uid: &EntityUid,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    uc::patch(repo, uid, request_body.into())
        .map(Into::into)
        .map_err(Into::into)
}
