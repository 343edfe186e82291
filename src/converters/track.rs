//! Track converters.

use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::{parse_album, parse_object, Fields, ParseOptions, OBJECT_KEYS};
use crate::error::{Result, SpoofyError};
use crate::fill::{fill_artists, fill_external_ids, fill_external_urls};
use crate::models::{FullTrack, PlaylistTrack, Resource, Track};

const TRACK_KEYS: &[&str] = &[
    "available_markets",
    "disc_number",
    "explicit",
    "preview_url",
    "track_number",
    "is_local",
    "duration_ms",
    "external_urls",
    "artists",
    "is_playable",
    "linked_from",
    "restrictions",
];

const FULL_TRACK_KEYS: &[&str] = &["popularity", "external_ids", "album"];

const PLAYLIST_TRACK_KEYS: &[&str] = &["track", "added_at", "added_by"];

/// Timestamp format of `added_at`.
const ADDED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn parse_duration(fields: &Fields<'_>) -> Result<Duration> {
    fields.required("duration_ms")?;
    fields
        .opt_i64("duration_ms")?
        .and_then(Duration::try_milliseconds)
        .ok_or_else(|| SpoofyError::InvalidField {
            kind: fields.kind(),
            field: "duration_ms".to_string(),
            expected: "a duration in milliseconds",
        })
}

/// Fields shared by every track flavour; no key check.
fn track_fields(fields: &Fields<'_>, options: &ParseOptions) -> Result<Track> {
    let mut track = Track {
        object: parse_object(fields)?,
        available_markets: fields.opt_str_list("available_markets")?.unwrap_or_default(),
        disc_number: fields.opt_u32("disc_number")?,
        explicit: fields.opt_bool("explicit")?,
        preview_url: fields.opt_str("preview_url")?,
        track_number: fields.opt_u32("track_number")?,
        is_local: fields.opt_bool("is_local")?,
        is_playable: fields.opt_bool("is_playable")?,
        duration: parse_duration(fields)?,
        ..Default::default()
    };

    fill_external_urls(&mut track, fields.required("external_urls")?)?;
    fill_artists(&mut track, fields.required("artists")?, options)?;

    Ok(track)
}

fn full_track_fields(fields: &Fields<'_>, options: &ParseOptions) -> Result<FullTrack> {
    let mut track = FullTrack {
        track: track_fields(fields, options)?,
        popularity: fields.required_u32("popularity")?,
        album: parse_album(fields.required("album")?, options)?,
        ..Default::default()
    };

    fill_external_ids(&mut track, fields.required("external_ids")?)?;

    Ok(track)
}

/// Parse a simplified track object.
pub fn parse_track(json: &Value, options: &ParseOptions) -> Result<Track> {
    let fields = Fields::new(Track::CLASS, json)?;
    fields.check_keys(&[OBJECT_KEYS, TRACK_KEYS], options)?;
    track_fields(&fields, options)
}

/// Parse a full track object, including its album.
pub fn parse_full_track(json: &Value, options: &ParseOptions) -> Result<FullTrack> {
    let fields = Fields::new(FullTrack::CLASS, json)?;
    fields.check_keys(&[OBJECT_KEYS, TRACK_KEYS, FULL_TRACK_KEYS], options)?;
    full_track_fields(&fields, options)
}

/// Parse a playlist item: `{"track": {...}, "added_at": "...", "added_by": {...}}`.
pub fn parse_playlist_track(json: &Value, options: &ParseOptions) -> Result<PlaylistTrack> {
    let fields = Fields::new(PlaylistTrack::CLASS, json)?;
    fields.check_keys(&[PLAYLIST_TRACK_KEYS], options)?;

    let track = parse_full_track(fields.required("track")?, options)?;

    let added_at = match fields.required_str("added_at")? {
        Some(raw) => {
            let naive = NaiveDateTime::parse_from_str(&raw, ADDED_AT_FORMAT).map_err(|source| {
                SpoofyError::InvalidTimestamp {
                    field: "added_at",
                    value: raw.clone(),
                    source,
                }
            })?;
            Some(Utc.from_utc_datetime(&naive))
        }
        None => None,
    };

    let added_by = match fields.required("added_by")? {
        Value::Null => None,
        user => Some(user.clone()),
    };

    Ok(PlaylistTrack {
        track,
        added_at,
        added_by,
    })
}
