// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use albums_core::{
    EntityUid,
    album::{Album, AlbumPatch, Entity},
    first_invalidity,
};
use albums_repo::album::EntityRepo;
use semval::Validate as _;

use super::*;

#[derive(Debug)]
pub struct ValidatedInput(Album);

/// Validate a new album with all fields required.
///
/// Only the first invalid field is reported.
pub fn validate_input(album: Album) -> InputResult<ValidatedInput> {
    first_invalidity(album.validate())?;
    Ok(ValidatedInput(album))
}

pub fn create_entity(new_album: Album) -> Result<Entity> {
    let ValidatedInput(album) = validate_input(new_album)?;
    Ok(Entity::with_random_uid(album))
}

pub fn create(repo: &mut impl EntityRepo, new_album: Album) -> Result<Entity> {
    let entity = create_entity(new_album)?;
    repo.insert_album_entity(entity.clone())?;
    log::debug!("Created album {uid}", uid = entity.uid);
    Ok(entity)
}

pub fn load_all(repo: &impl EntityRepo) -> Result<Vec<Entity>> {
    repo.load_album_entities().map_err(Into::into)
}

pub fn load_one(repo: &impl EntityRepo, uid: &EntityUid) -> Result<Entity> {
    repo.load_album_entity(uid).map_err(Into::into)
}

pub fn purge(repo: &mut impl EntityRepo, uid: &EntityUid) -> Result<Entity> {
    let entity = repo.purge_album_entity(uid)?;
    log::debug!("Purged album {uid}");
    Ok(entity)
}

/// Modify the present fields of an existing album.
///
/// All fields of the patch are validated before any of them
/// is applied. The album remains unmodified if the patch is
/// rejected.
pub fn patch(repo: &mut impl EntityRepo, uid: &EntityUid, patch: AlbumPatch) -> Result<Entity> {
    let Entity {
        uid,
        body: mut album,
    } = repo.load_album_entity(uid)?;
    first_invalidity(patch.validate()).map_err(InputError)?;
    if patch.is_empty() {
        log::debug!("Nothing to patch in album {uid}");
        return Ok(Entity::new(uid, album));
    }
    patch.apply_to(&mut album);
    debug_assert!(album.validate().is_ok());
    repo.update_album_entity(&uid, album.clone())?;
    log::debug!("Patched album {uid}");
    Ok(Entity::new(uid, album))
}
