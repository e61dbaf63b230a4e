// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, fmt, str::FromStr};

use semval::prelude::*;
use uuid::Uuid;

///////////////////////////////////////////////////////////////////////
// EntityUid
///////////////////////////////////////////////////////////////////////

/// Opaque, immutable identifier of an entity.
///
/// Identifiers minted by [`EntityUid::random()`] are hyphenated UUID v4
/// strings. Any other string is accepted when parsing, e.g. for looking
/// up an entity by a path parameter, but only non-empty identifiers are
/// valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityUid(String);

impl EntityUid {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        let Self(inner) = self;
        inner
    }

    #[must_use]
    pub fn into_string(self) -> String {
        let Self(inner) = self;
        inner
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityUidInvalidity {
    Empty,
}

impl Validate for EntityUid {
    type Invalidity = EntityUidInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.as_str().is_empty(), Self::Invalidity::Empty)
            .into()
    }
}

impl AsRef<str> for EntityUid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for EntityUid {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for EntityUid {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

impl From<EntityUid> for String {
    fn from(from: EntityUid) -> Self {
        from.into_string()
    }
}

impl FromStr for EntityUid {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl fmt::Display for EntityUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///////////////////////////////////////////////////////////////////////
// Entity
///////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug, PartialEq)]
pub struct Entity<B> {
    pub uid: EntityUid,
    pub body: B,
}

impl<B> Entity<B> {
    #[must_use]
    pub const fn new(uid: EntityUid, body: B) -> Self {
        Self { uid, body }
    }

    /// Create a new entity with a freshly generated identifier.
    #[must_use]
    pub fn with_random_uid(body: B) -> Self {
        Self::new(EntityUid::random(), body)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityInvalidity<I> {
    Uid(EntityUidInvalidity),
    Body(I),
}

impl<B> Validate for Entity<B>
where
    B: Validate,
{
    type Invalidity = EntityInvalidity<B::Invalidity>;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { uid, body } = self;
        ValidationContext::new()
            .validate_with(uid, EntityInvalidity::Uid)
            .validate_with(body, EntityInvalidity::Body)
            .into()
    }
}

/// Reduce a validation result to its first invalidity.
///
/// Invalidities are reported in the order in which they have
/// been detected.
pub fn first_invalidity<V: semval::Invalidity>(result: ValidationResult<V>) -> Result<(), V> {
    match result {
        Ok(()) => Ok(()),
        Err(invalidities) => invalidities.into_iter().next().map_or(Ok(()), Err),
    }
}
