// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::result::Result as StdResult;

use thiserror::Error;

use albums_usecases as uc;

pub mod album;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    UseCase(#[from] uc::Error),
}

pub type Result<T> = StdResult<T, Error>;
