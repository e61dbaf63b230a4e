// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{error::Error as StdError, fmt};

use semval::prelude::*;

use crate::entity::first_invalidity;

/// Minimum number of characters of a title or artist name.
pub const NAME_LEN_MIN: usize = 2;

/// Maximum number of characters of a title or artist name.
pub const NAME_LEN_MAX: usize = 100;

///////////////////////////////////////////////////////////////////////
// Field validation
///////////////////////////////////////////////////////////////////////

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NameInvalidity {
    Missing,
    Length,
}

/// A title or artist name in the context of either a required
/// or an optional field.
#[derive(Copy, Clone, Debug)]
pub struct NameInput<'a> {
    pub value: &'a str,
    pub required: bool,
}

impl<'a> NameInput<'a> {
    #[must_use]
    pub const fn required(value: &'a str) -> Self {
        Self {
            value,
            required: true,
        }
    }

    #[must_use]
    pub const fn optional(value: &'a str) -> Self {
        Self {
            value,
            required: false,
        }
    }
}

impl Validate for NameInput<'_> {
    type Invalidity = NameInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { value, required } = *self;
        // Lengths are measured in characters, not bytes
        let len = value.chars().count();
        ValidationContext::new()
            .invalidate_if(required && value.is_empty(), Self::Invalidity::Missing)
            .invalidate_if(
                !value.is_empty() && !(NAME_LEN_MIN..=NAME_LEN_MAX).contains(&len),
                Self::Invalidity::Length,
            )
            .into()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PriceInvalidity {
    Missing,
    Negative,
}

#[derive(Copy, Clone, Debug)]
pub struct PriceInput {
    pub value: f64,
    pub required: bool,
}

impl PriceInput {
    #[must_use]
    pub const fn required(value: f64) -> Self {
        Self {
            value,
            required: true,
        }
    }

    #[must_use]
    pub const fn optional(value: f64) -> Self {
        Self {
            value,
            required: false,
        }
    }
}

impl Validate for PriceInput {
    type Invalidity = PriceInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { value, required } = *self;
        // A required price must be strictly positive. This check
        // supersedes the check for negative values.
        ValidationContext::new()
            .invalidate_if(required && value <= 0.0, Self::Invalidity::Missing)
            .invalidate_if(!required && value < 0.0, Self::Invalidity::Negative)
            .into()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlbumInvalidity {
    Title(NameInvalidity),
    Artist(NameInvalidity),
    Price(PriceInvalidity),
}

fn fmt_name_invalidity(
    f: &mut fmt::Formatter<'_>,
    field: &str,
    invalidity: NameInvalidity,
) -> fmt::Result {
    match invalidity {
        NameInvalidity::Missing => write!(f, "{field} is required"),
        NameInvalidity::Length => write!(
            f,
            "{field} must be between {NAME_LEN_MIN} and {NAME_LEN_MAX} characters"
        ),
    }
}

impl fmt::Display for AlbumInvalidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Title(invalidity) => fmt_name_invalidity(f, "Title", invalidity),
            Self::Artist(invalidity) => fmt_name_invalidity(f, "Artist", invalidity),
            Self::Price(PriceInvalidity::Missing) => {
                f.write_str("Price is required and must be greater than 0")
            }
            Self::Price(PriceInvalidity::Negative) => {
                f.write_str("Price must be greater than or equal to 0")
            }
        }
    }
}

impl StdError for AlbumInvalidity {}

pub fn validate_title(title: &str, required: bool) -> Result<(), AlbumInvalidity> {
    first_invalidity(NameInput { value: title, required }.validate())
        .map_err(AlbumInvalidity::Title)
}

pub fn validate_artist(artist: &str, required: bool) -> Result<(), AlbumInvalidity> {
    first_invalidity(
        NameInput {
            value: artist,
            required,
        }
        .validate(),
    )
    .map_err(AlbumInvalidity::Artist)
}

pub fn validate_price(price: f64, required: bool) -> Result<(), AlbumInvalidity> {
    first_invalidity(
        PriceInput {
            value: price,
            required,
        }
        .validate(),
    )
    .map_err(AlbumInvalidity::Price)
}

///////////////////////////////////////////////////////////////////////
// Album
///////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Album {
    pub title: String,

    pub artist: String,

    pub price: f64,
}

/// All fields are required.
impl Validate for Album {
    type Invalidity = AlbumInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            title,
            artist,
            price,
        } = self;
        ValidationContext::new()
            .validate_with(&NameInput::required(title), Self::Invalidity::Title)
            .validate_with(&NameInput::required(artist), Self::Invalidity::Artist)
            .validate_with(&PriceInput::required(*price), Self::Invalidity::Price)
            .into()
    }
}

pub type Entity = crate::entity::Entity<Album>;

///////////////////////////////////////////////////////////////////////
// AlbumPatch
///////////////////////////////////////////////////////////////////////

/// Partial modification of an [`Album`].
///
/// Only fields that are present will be validated and applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlbumPatch {
    pub title: Option<String>,

    pub artist: Option<String>,

    pub price: Option<f64>,
}

impl AlbumPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            title,
            artist,
            price,
        } = self;
        title.is_none() && artist.is_none() && price.is_none()
    }

    /// Overwrite the fields of `album` that are present.
    ///
    /// The patch is supposed to be valid.
    pub fn apply_to(self, album: &mut Album) {
        debug_assert!(self.validate().is_ok());
        let Self {
            title,
            artist,
            price,
        } = self;
        if let Some(title) = title {
            album.title = title;
        }
        if let Some(artist) = artist {
            album.artist = artist;
        }
        if let Some(price) = price {
            album.price = price;
        }
    }
}

/// Present fields are validated as optional fields in the
/// order title, artist, price.
impl Validate for AlbumPatch {
    type Invalidity = AlbumInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            title,
            artist,
            price,
        } = self;
        let mut context = ValidationContext::new();
        if let Some(title) = title {
            context = context.validate_with(&NameInput::optional(title), Self::Invalidity::Title);
        }
        if let Some(artist) = artist {
            context = context.validate_with(&NameInput::optional(artist), Self::Invalidity::Artist);
        }
        if let Some(price) = price {
            context = context.validate_with(&PriceInput::optional(*price), Self::Invalidity::Price);
        }
        context.into()
    }
}
