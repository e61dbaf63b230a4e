// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

pub mod gatekeeper;

#[derive(Error, Debug)]
pub enum Error {
    #[error("timeout: {reason}")]
    TaskTimeout { reason: String },

    #[error("decommissioned")]
    Decommissioned,
}

pub type Result<T> = std::result::Result<T, Error>;
