// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::result::Result as StdResult;

use albums_core::album::AlbumInvalidity;
use albums_repo::prelude::*;
use thiserror::Error;

pub mod album;

/// Invalid input that has been rejected before touching any data.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct InputError(#[from] pub AlbumInvalidity);

pub type InputResult<T> = StdResult<T, InputError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

pub type Result<T> = StdResult<T, Error>;
