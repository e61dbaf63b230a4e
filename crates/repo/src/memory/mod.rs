// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use albums_core::{
    EntityUid,
    album::{Album, Entity},
};

use crate::{album::EntityRepo, prelude::*};

/// Volatile, in-memory repository.
///
/// The contents are lost when the repository is dropped. Lookups
/// are linear scans over the entities in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRepo {
    albums: Vec<Entity>,
}

impl InMemoryRepo {
    #[must_use]
    pub const fn new() -> Self {
        Self { albums: Vec::new() }
    }

    /// Create a repository with the given entities.
    ///
    /// Entities with a duplicate identifier are discarded.
    #[must_use]
    pub fn with_albums(albums: impl IntoIterator<Item = Entity>) -> Self {
        let mut repo = Self::new();
        for entity in albums {
            let uid = entity.uid.clone();
            if let Err(err) = repo.insert_album_entity(entity) {
                log::warn!("Discarding album {uid}: {err}");
            }
        }
        repo
    }

    fn position(&self, uid: &EntityUid) -> RepoResult<usize> {
        self.albums
            .iter()
            .position(|entity| &entity.uid == uid)
            .ok_or(RepoError::NotFound)
    }
}

impl EntityRepo for InMemoryRepo {
    fn load_album_entities(&self) -> RepoResult<Vec<Entity>> {
        Ok(self.albums.clone())
    }

    fn load_album_entity(&self, uid: &EntityUid) -> RepoResult<Entity> {
        let index = self.position(uid)?;
        Ok(self.albums[index].clone())
    }

    fn count_album_entities(&self) -> RepoResult<usize> {
        Ok(self.albums.len())
    }

    fn insert_album_entity(&mut self, entity: Entity) -> RepoResult<()> {
        if self.position(&entity.uid).is_ok() {
            return Err(RepoError::Conflict);
        }
        self.albums.push(entity);
        Ok(())
    }

    fn update_album_entity(&mut self, uid: &EntityUid, album: Album) -> RepoResult<()> {
        let index = self.position(uid)?;
        self.albums[index].body = album;
        Ok(())
    }

    fn purge_album_entity(&mut self, uid: &EntityUid) -> RepoResult<Entity> {
        let index = self.position(uid)?;
        Ok(self.albums.remove(index))
    }
}
