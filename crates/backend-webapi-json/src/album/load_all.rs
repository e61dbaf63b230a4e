// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use albums_usecases::album as uc;

use super::*;

pub type ResponseBody = Vec<Entity>;

pub fn handle_request(repo: &impl EntityRepo) -> Result<ResponseBody> {
    uc::load_all(repo)
        .map(|entities| entities.into_iter().map(Into::into).collect())
        .map_err(Into::into)
}
