//! Artist and image converters.

use serde_json::Value;

use super::{parse_object, Fields, ParseOptions, OBJECT_KEYS};
use crate::error::{Result, SpoofyError};
use crate::fill::{fill_external_urls, fill_images};
use crate::models::{Artist, Followers, FullArtist, Image, Resource};

const ARTIST_KEYS: &[&str] = &["external_urls"];

const FULL_ARTIST_KEYS: &[&str] = &["followers", "genres", "images", "popularity"];

const IMAGE_KEYS: &[&str] = &["url", "width", "height"];

fn artist_fields(fields: &Fields<'_>) -> Result<Artist> {
    let mut artist = Artist {
        object: parse_object(fields)?,
        ..Default::default()
    };
    fill_external_urls(&mut artist, fields.value("external_urls"))?;
    Ok(artist)
}

/// Parse a simplified artist object.
pub fn parse_artist(json: &Value, options: &ParseOptions) -> Result<Artist> {
    let fields = Fields::new(Artist::CLASS, json)?;
    fields.check_keys(&[OBJECT_KEYS, ARTIST_KEYS], options)?;
    artist_fields(&fields)
}

/// Parse a full artist object. Followers, genres, images and popularity must all be present.
pub fn parse_full_artist(json: &Value, options: &ParseOptions) -> Result<FullArtist> {
    let fields = Fields::new(FullArtist::CLASS, json)?;
    fields.check_keys(&[OBJECT_KEYS, ARTIST_KEYS, FULL_ARTIST_KEYS], options)?;

    fields.required("followers")?;
    fields.required("genres")?;

    let mut artist = FullArtist {
        artist: artist_fields(&fields)?,
        followers: fields.opt_typed::<Followers>("followers", "a followers object")?,
        genres: fields.opt_str_list("genres")?.unwrap_or_default(),
        popularity: fields.required_u32("popularity")?,
        ..Default::default()
    };

    fill_images(&mut artist, fields.required("images")?, options)?;

    Ok(artist)
}

/// Parse an image object.
pub fn parse_image(json: &Value, options: &ParseOptions) -> Result<Image> {
    let fields = Fields::new("Image", json)?;
    fields.check_keys(&[IMAGE_KEYS], options)?;

    let url = fields
        .required_str("url")?
        .ok_or_else(|| SpoofyError::InvalidField {
            kind: "Image",
            field: "url".to_string(),
            expected: "a string",
        })?;

    Ok(Image {
        url,
        width: fields.required_u32("width")?,
        height: fields.required_u32("height")?,
    })
}
