// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

mod entity;
pub use self::entity::*;

pub mod album;
pub use self::album::{
    Album, AlbumInvalidity, AlbumPatch, Entity as AlbumEntity, validate_artist, validate_price,
    validate_title,
};

pub mod prelude {
    // Re-export trait methods from semval
    pub use semval::{IsValid, Validate as _};

    pub use crate::entity::*;
}
