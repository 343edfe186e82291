//! Fill-in capabilities for related sub-objects.
//!
//! Each capability is a small accessor trait plus a free function that reads one
//! sub-structure of a response and populates the matching collection on any
//! record implementing the trait. Sequences (artists, images) are replaced;
//! mappings (external URLs and IDs, tracks) are merged into what is already there.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::converters::{json_type_name, parse_artist, parse_image, parse_track, ParseOptions};
use crate::error::{Result, SpoofyError};
use crate::models::{
    Album, Artist, ExternalIds, ExternalUrls, FullAlbum, FullArtist, FullTrack, Image,
    SimpleArtist, SimpleTrack, Track, TrackPosition,
};

/// Records that carry external URLs.
pub trait HasExternalUrls {
    fn external_urls_mut(&mut self) -> &mut ExternalUrls;
}

/// Records that carry an ordered artist list.
pub trait HasArtists {
    fn artists_mut(&mut self) -> &mut Vec<SimpleArtist>;
}

/// Records that carry an ordered image list.
pub trait HasImages {
    fn images_mut(&mut self) -> &mut Vec<Image>;
}

/// Records that carry a position-keyed track map.
pub trait HasTracks {
    fn tracks_mut(&mut self) -> &mut BTreeMap<TrackPosition, SimpleTrack>;
}

/// Records that carry external IDs.
pub trait HasExternalIds {
    fn external_ids_mut(&mut self) -> &mut ExternalIds;
}

fn string_map(kind: &'static str, data: &Value) -> Result<BTreeMap<String, String>> {
    let map = match data {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Object(map) => map,
        other => {
            return Err(SpoofyError::NotAnObject {
                kind,
                found: json_type_name(other),
            })
        }
    };

    map.iter()
        .map(|(key, value)| match value.as_str() {
            Some(s) => Ok((key.clone(), s.to_string())),
            None => Err(SpoofyError::InvalidField {
                kind,
                field: key.clone(),
                expected: "a string",
            }),
        })
        .collect()
}

fn array<'a>(kind: &'static str, field: &str, data: &'a Value) -> Result<&'a [Value]> {
    match data {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items.as_slice()),
        _ => Err(SpoofyError::InvalidField {
            kind,
            field: field.to_string(),
            expected: "an array",
        }),
    }
}

/// Merge an `external_urls` object into the record.
pub fn fill_external_urls<R: HasExternalUrls + ?Sized>(record: &mut R, data: &Value) -> Result<()> {
    let urls = string_map("ExternalUrls", data)?;
    record.external_urls_mut().extend(urls);
    Ok(())
}

/// Merge an `external_ids` object into the record.
pub fn fill_external_ids<R: HasExternalIds + ?Sized>(record: &mut R, data: &Value) -> Result<()> {
    let ids = string_map("ExternalIds", data)?;
    record.external_ids_mut().extend(ids);
    Ok(())
}

/// Replace the record's artists with those in an `artists` array.
pub fn fill_artists<R: HasArtists + ?Sized>(
    record: &mut R,
    data: &Value,
    options: &ParseOptions,
) -> Result<()> {
    let artists = array("Artists", "artists", data)?
        .iter()
        .map(|item| parse_artist(item, options))
        .collect::<Result<Vec<_>>>()?;
    *record.artists_mut() = artists;
    Ok(())
}

/// Replace the record's images with those in an `images` array.
pub fn fill_images<R: HasImages + ?Sized>(
    record: &mut R,
    data: &Value,
    options: &ParseOptions,
) -> Result<()> {
    let images = array("Images", "images", data)?
        .iter()
        .map(|item| parse_image(item, options))
        .collect::<Result<Vec<_>>>()?;
    *record.images_mut() = images;
    Ok(())
}

/// Merge tracks into the record.
///
/// `data` is either a paging object (`{"items": [...], "offset": n}`) or a bare
/// array of track objects. Numbered tracks are keyed by their own position.
/// Tracks without a disc or track number are placed on disc 1 after the page
/// offset, or at the next free slot when that one is already taken.
pub fn fill_tracks<R: HasTracks + ?Sized>(
    record: &mut R,
    data: &Value,
    options: &ParseOptions,
) -> Result<()> {
    let (items, offset) = match data {
        Value::Object(page) => {
            let offset = page_offset(page.get("offset"))?;
            match page.get("items") {
                Some(items) => (array("Tracks", "items", items)?, offset),
                None => (&[][..], offset),
            }
        }
        other => (array("Tracks", "tracks", other)?, 0),
    };

    let tracks = items
        .iter()
        .map(|item| parse_track(item, options))
        .collect::<Result<Vec<_>>>()?;
    merge_tracks(record.tracks_mut(), tracks, offset)
}

/// Key `tracks` into `map` by position.
///
/// Numbered tracks go in first, so an unnumbered track never displaces one;
/// unnumbered tracks take disc 1 at `offset + index + 1` or the next free slot.
pub(crate) fn merge_tracks(
    map: &mut BTreeMap<TrackPosition, SimpleTrack>,
    tracks: Vec<SimpleTrack>,
    offset: usize,
) -> Result<()> {
    let mut unnumbered = Vec::new();
    for (index, track) in tracks.into_iter().enumerate() {
        match track.position() {
            Some(position) => insert_track(map, position, track),
            None => unnumbered.push((index, track)),
        }
    }

    for (index, track) in unnumbered {
        let fallback = offset
            .checked_add(index)
            .and_then(|slot| track.position_or(slot))
            .ok_or_else(offset_overflow)?;
        let position = free_slot(map, fallback)?;
        debug!(
            "Track {:?} has no disc/track number, placing it at {:?}",
            track.object.id, position
        );
        insert_track(map, position, track);
    }

    Ok(())
}

fn page_offset(value: Option<&Value>) -> Result<usize> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| u32::try_from(*n).is_ok())
            .ok_or_else(offset_overflow),
    }
}

fn offset_overflow() -> SpoofyError {
    SpoofyError::InvalidField {
        kind: "Tracks",
        field: "offset".to_string(),
        expected: "a track offset within u32",
    }
}

/// First position at or after `start` on the same disc with no track in it.
fn free_slot(
    tracks: &BTreeMap<TrackPosition, SimpleTrack>,
    start: TrackPosition,
) -> Result<TrackPosition> {
    let mut position = start;
    while tracks.contains_key(&position) {
        position.track_number = position
            .track_number
            .checked_add(1)
            .ok_or_else(offset_overflow)?;
    }
    Ok(position)
}

fn insert_track(
    tracks: &mut BTreeMap<TrackPosition, SimpleTrack>,
    position: TrackPosition,
    track: SimpleTrack,
) {
    let id = track.object.id.clone();
    if let Some(previous) = tracks.insert(position, track) {
        if previous.object.id != id {
            warn!(
                "Track {:?} replaced {:?} at disc {} track {}",
                id, previous.object.id, position.disc_number, position.track_number
            );
        }
    }
}

impl HasExternalUrls for Album {
    fn external_urls_mut(&mut self) -> &mut ExternalUrls {
        &mut self.external_urls
    }
}

impl HasArtists for Album {
    fn artists_mut(&mut self) -> &mut Vec<SimpleArtist> {
        &mut self.artists
    }
}

impl HasImages for Album {
    fn images_mut(&mut self) -> &mut Vec<Image> {
        &mut self.images
    }
}

impl HasTracks for Album {
    fn tracks_mut(&mut self) -> &mut BTreeMap<TrackPosition, SimpleTrack> {
        &mut self.tracks
    }
}

impl HasExternalIds for FullAlbum {
    fn external_ids_mut(&mut self) -> &mut ExternalIds {
        &mut self.external_ids
    }
}

impl HasExternalUrls for Track {
    fn external_urls_mut(&mut self) -> &mut ExternalUrls {
        &mut self.external_urls
    }
}

impl HasArtists for Track {
    fn artists_mut(&mut self) -> &mut Vec<SimpleArtist> {
        &mut self.artists
    }
}

impl HasExternalIds for FullTrack {
    fn external_ids_mut(&mut self) -> &mut ExternalIds {
        &mut self.external_ids
    }
}

impl HasExternalUrls for Artist {
    fn external_urls_mut(&mut self) -> &mut ExternalUrls {
        &mut self.external_urls
    }
}

impl HasImages for FullArtist {
    fn images_mut(&mut self) -> &mut Vec<Image> {
        &mut self.images
    }
}
