// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use albums_core::{
    EntityUid,
    album::{Album, Entity},
};

use crate::prelude::*;

/// Ordered storage of album entities.
///
/// Entities are kept in insertion order. All lookups are done
/// by the first entity with a matching identifier.
pub trait EntityRepo {
    /// Load all entities in insertion order.
    fn load_album_entities(&self) -> RepoResult<Vec<Entity>>;

    fn load_album_entity(&self, uid: &EntityUid) -> RepoResult<Entity>;

    fn count_album_entities(&self) -> RepoResult<usize>;

    /// Append a new entity.
    ///
    /// Fails with [`RepoError::Conflict`] if an entity with the same
    /// identifier already exists.
    fn insert_album_entity(&mut self, entity: Entity) -> RepoResult<()>;

    /// Replace the body of an existing entity in place.
    fn update_album_entity(&mut self, uid: &EntityUid, album: Album) -> RepoResult<()>;

    /// Remove an existing entity and return it.
    ///
    /// The order of all remaining entities is preserved.
    fn purge_album_entity(&mut self, uid: &EntityUid) -> RepoResult<Entity>;
}

/// Albums that are available after startup.
#[must_use]
pub fn seed_entities() -> Vec<Entity> {
    [
        (
            "550e8400-e29b-41d4-a716-446655440001",
            "Blue Train",
            "John Coltrane",
            56.99,
        ),
        (
            "550e8400-e29b-41d4-a716-446655440002",
            "Jeru",
            "Gerry Mulligan",
            17.99,
        ),
        (
            "550e8400-e29b-41d4-a716-446655440003",
            "Sarah Vaughan and Clifford Brown",
            "Sarah Vaughan",
            39.99,
        ),
    ]
    .into_iter()
    .map(|(uid, title, artist, price)| {
        Entity::new(
            uid.into(),
            Album {
                title: title.to_owned(),
                artist: artist.to_owned(),
                price,
            },
        )
    })
    .collect()
}
