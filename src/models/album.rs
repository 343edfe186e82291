//! Album-related models.
//!
//! [`Album`] covers the simplified album object the API nests in tracks and
//! listings; [`FullAlbum`] adds the fields only returned by the album endpoint.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::artist::SimpleArtist;
use super::common::{
    impl_resource_display, Copyright, DatePrecision, ExternalIds, ExternalUrls, Image, Object,
    ReleaseDate, Resource,
};
use super::custom_serde::position_map;
use super::track::{SimpleTrack, TrackPosition};
use crate::client::Client;
use crate::converters::ParseOptions;
use crate::error::{Result, SpoofyError};
use crate::fill::fill_tracks;

/// An album record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Album {
    /// Identity fields.
    #[serde(flatten)]
    pub object: Object,

    /// Relationship to an artist in "appears on" listings, e.g. `appears_on`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_group: Option<String>,

    /// Album type: "album", "single", or "compilation".
    pub album_type: Option<String>,

    /// ISO 3166-1 alpha-2 codes of the markets the album is available in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_markets: Option<Vec<String>>,

    /// Number of tracks on the album, which may exceed those loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tracks: Option<u32>,

    /// Release date, absent when the response carries no precision.
    pub release_date: Option<ReleaseDate>,

    /// Precision of `release_date`.
    pub release_date_precision: Option<DatePrecision>,

    /// Known external URLs for this album.
    #[serde(default)]
    pub external_urls: ExternalUrls,

    /// Album artists.
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,

    /// Cover images in various sizes.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Tracks loaded so far, ordered by disc and track number.
    #[serde(default, with = "position_map")]
    pub tracks: BTreeMap<TrackPosition, SimpleTrack>,
}

/// Alias of [`Album`].
pub type SimpleAlbum = Album;

impl Album {
    /// The release date if it was present and readable.
    pub fn released_on(&self) -> Option<NaiveDate> {
        self.release_date.as_ref().and_then(ReleaseDate::date)
    }

    /// Get the primary artist name.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().and_then(|a| a.object.name.as_deref())
    }

    /// Get all artist names joined by a separator.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists
            .iter()
            .filter_map(|a| a.object.name.as_deref())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Get the largest cover image available.
    pub fn largest_image(&self) -> Option<&Image> {
        self.images.iter().max_by_key(|img| img.area())
    }

    /// Spotify web URL, if the response carried one.
    pub fn link(&self) -> Option<&str> {
        self.external_urls.get("spotify").map(String::as_str)
    }

    /// Whether the album is available in `market`. Unknown availability counts as available.
    pub fn available_in(&self, market: &str) -> bool {
        self.available_markets
            .as_ref()
            .map_or(true, |markets| markets.iter().any(|m| m == market))
    }

    /// Total duration of the loaded tracks.
    pub fn total_duration(&self) -> Duration {
        self.tracks
            .values()
            .fold(Duration::zero(), |acc, t| acc + t.duration)
    }

    /// Get loaded tracks for a specific disc.
    pub fn tracks_for_disc(&self, disc_number: u32) -> Vec<&SimpleTrack> {
        self.tracks
            .iter()
            .filter(|(pos, _)| pos.disc_number == disc_number)
            .map(|(_, track)| track)
            .collect()
    }

    /// Fetch the album's track listing through `client` and fill `tracks`.
    ///
    /// Only the first page returned by the client is used. Returns the number of
    /// tracks now loaded.
    pub async fn load_tracks<C: Client>(&mut self, client: &C) -> Result<usize> {
        let id = self
            .object
            .id
            .clone()
            .ok_or(SpoofyError::MissingId(Self::CLASS))?;

        let page = client.album_tracks(&id).await?;
        fill_tracks(self, &page, &ParseOptions::default())?;
        debug!("Loaded {} tracks for album {}", self.tracks.len(), id);

        Ok(self.tracks.len())
    }
}

impl Resource for Album {
    const TYPE: &'static str = "album";
    const CLASS: &'static str = "Album";

    fn object(&self) -> &Object {
        &self.object
    }
}

/// A complete album record.
///
/// Carries everything in [`Album`] plus the fields the album endpoint adds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullAlbum {
    #[serde(flatten)]
    pub album: Album,

    /// Genres associated with the album. Usually empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,

    /// Record label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Popularity between 0 and 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,

    /// Copyright statements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyrights: Option<Vec<Copyright>>,

    /// Known external IDs, such as `upc`.
    #[serde(default)]
    pub external_ids: ExternalIds,
}

impl FullAlbum {
    /// Universal Product Code, if the response carried one.
    pub fn upc(&self) -> Option<&str> {
        self.external_ids.get("upc").map(String::as_str)
    }
}

impl Resource for FullAlbum {
    const TYPE: &'static str = "album";
    const CLASS: &'static str = "FullAlbum";

    fn object(&self) -> &Object {
        &self.album.object
    }
}

impl_resource_display!(Album, FullAlbum);
