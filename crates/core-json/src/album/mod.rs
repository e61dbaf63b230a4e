// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use serde::{
    Deserializer,
    de::{IgnoredAny, MapAccess, Visitor},
};

use crate::prelude::*;

mod _core {
    pub(super) use albums_core::{
        EntityUid,
        album::{Album, AlbumPatch, Entity},
    };
}

///////////////////////////////////////////////////////////////////////
// Album
///////////////////////////////////////////////////////////////////////

/// Album-shaped request body.
///
/// Every field is optional. Missing fields and `null` values are
/// treated like empty values. Unknown fields are ignored, and so is
/// an `id` as long as it is a string.
///
/// Only JSON objects are accepted.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Album {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

struct AlbumVisitor;

impl<'de> Visitor<'de> for AlbumVisitor {
    type Value = Album;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an album object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut album = Album::default();
        while let Some(key) = map.next_key::<String>()? {
            // Repeated keys override previous values
            match key.as_str() {
                "title" => album.title = map.next_value()?,
                "artist" => album.artist = map.next_value()?,
                "price" => album.price = map.next_value()?,
                "id" => {
                    map.next_value::<Option<String>>()?;
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(album)
    }
}

impl<'de> Deserialize<'de> for Album {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AlbumVisitor)
    }
}

/// All fields are taken as they are, empty values included.
impl From<Album> for _core::Album {
    fn from(from: Album) -> Self {
        let Album {
            title,
            artist,
            price,
        } = from;
        Self {
            title: title.unwrap_or_default(),
            artist: artist.unwrap_or_default(),
            price: price.unwrap_or_default(),
        }
    }
}

/// Only non-empty strings and positive prices count as present.
///
/// Consequently a patch can neither clear a title or artist nor
/// set the price to 0.
impl From<Album> for _core::AlbumPatch {
    fn from(from: Album) -> Self {
        let Album {
            title,
            artist,
            price,
        } = from;
        Self {
            title: title.filter(|title| !title.is_empty()),
            artist: artist.filter(|artist| !artist.is_empty()),
            price: price.filter(|price| *price > 0.0),
        }
    }
}

///////////////////////////////////////////////////////////////////////
// Entity
///////////////////////////////////////////////////////////////////////

/// An album with its identifier, as returned in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,

    pub title: String,

    pub artist: String,

    pub price: f64,
}

impl From<_core::Entity> for Entity {
    fn from(from: _core::Entity) -> Self {
        let _core::Entity { uid, body } = from;
        let _core::Album {
            title,
            artist,
            price,
        } = body;
        Self {
            id: uid.into(),
            title,
            artist,
            price,
        }
    }
}

impl From<Entity> for _core::Entity {
    fn from(from: Entity) -> Self {
        let Entity {
            id,
            title,
            artist,
            price,
        } = from;
        Self::new(
            _core::EntityUid::from(id),
            _core::Album {
                title,
                artist,
                price,
            },
        )
    }
}
