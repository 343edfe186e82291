//! Track-related models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::album::SimpleAlbum;
use super::artist::SimpleArtist;
use super::common::{impl_resource_display, ExternalIds, ExternalUrls, Object, Resource};
use super::custom_serde::duration_ms;
use crate::client::Client;
use crate::error::{Result, SpoofyError};

/// Where a track sits on its album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackPosition {
    pub disc_number: u32,
    pub track_number: u32,
}

/// A track record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    /// Identity fields.
    #[serde(flatten)]
    pub object: Object,

    /// ISO 3166-1 alpha-2 codes of the markets the track is available in.
    #[serde(default)]
    pub available_markets: Vec<String>,

    /// Disc number, usually 1 unless the album has several discs.
    pub disc_number: Option<u32>,

    /// Whether the track has explicit lyrics.
    pub explicit: Option<bool>,

    /// URL of a 30 second MP3 preview.
    pub preview_url: Option<String>,

    /// Track number on its disc.
    pub track_number: Option<u32>,

    /// Whether the track is a local file.
    pub is_local: Option<bool>,

    /// Whether the track is playable in the market the request was made for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_playable: Option<bool>,

    /// Track length.
    #[serde(with = "duration_ms", rename = "duration_ms")]
    pub duration: Duration,

    /// Known external URLs for this track.
    #[serde(default)]
    pub external_urls: ExternalUrls,

    /// Artists who performed the track.
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

/// Alias of [`Track`].
pub type SimpleTrack = Track;

impl Default for Track {
    fn default() -> Self {
        Self {
            object: Object::default(),
            available_markets: Vec::new(),
            disc_number: None,
            explicit: None,
            preview_url: None,
            track_number: None,
            is_local: None,
            is_playable: None,
            duration: Duration::zero(),
            external_urls: ExternalUrls::new(),
            artists: Vec::new(),
        }
    }
}

impl Track {
    /// Disc and track number, when the response carried both.
    pub fn position(&self) -> Option<TrackPosition> {
        Some(TrackPosition {
            disc_number: self.disc_number?,
            track_number: self.track_number?,
        })
    }

    /// Position of the track, falling back to disc 1 at `index + 1`.
    ///
    /// `None` when the fallback track number does not fit in a `u32`.
    pub fn position_or(&self, index: usize) -> Option<TrackPosition> {
        if let Some(position) = self.position() {
            return Some(position);
        }
        let track_number = match self.track_number {
            Some(number) => number,
            None => u32::try_from(index).ok()?.checked_add(1)?,
        };
        Some(TrackPosition {
            disc_number: self.disc_number.unwrap_or(1),
            track_number,
        })
    }

    /// Whether the track is playable in `market` (an ISO 3166-1 alpha-2 code).
    pub fn available_in(&self, market: &str) -> bool {
        self.available_markets.iter().any(|m| m == market)
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

    /// Get duration formatted as MM:SS.
    pub fn duration_formatted(&self) -> String {
        let total_seconds = self.duration.num_seconds();
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }

    /// Fetch the track's audio features through `client`.
    pub async fn audio_features<C: Client>(&self, client: &C) -> Result<Value> {
        let id = self
            .object
            .id
            .as_deref()
            .ok_or(SpoofyError::MissingId(Self::CLASS))?;
        client.audio_features(id).await
    }
}

impl Resource for Track {
    const TYPE: &'static str = "track";
    const CLASS: &'static str = "Track";

    fn object(&self) -> &Object {
        &self.object
    }
}

/// A complete track record, including the album it appears on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullTrack {
    #[serde(flatten)]
    pub track: Track,

    /// Popularity between 0 and 100.
    pub popularity: Option<u32>,

    /// Known external IDs, such as `isrc`.
    #[serde(default)]
    pub external_ids: ExternalIds,

    /// The album the track appears on.
    pub album: SimpleAlbum,
}

impl FullTrack {
    /// International Standard Recording Code, if the response carried one.
    pub fn isrc(&self) -> Option<&str> {
        self.external_ids.get("isrc").map(String::as_str)
    }
}

impl Resource for FullTrack {
    const TYPE: &'static str = "track";
    const CLASS: &'static str = "FullTrack";

    fn object(&self) -> &Object {
        &self.track.object
    }
}

/// A track as listed in a playlist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistTrack {
    /// The track itself.
    pub track: FullTrack,

    /// When the track was added. Absent for very old playlists.
    pub added_at: Option<DateTime<Utc>>,

    /// The user who added the track, kept as returned.
    pub added_by: Option<Value>,
}

impl PlaylistTrack {
    /// ID of the user who added the track.
    pub fn added_by_id(&self) -> Option<&str> {
        self.added_by.as_ref()?.get("id")?.as_str()
    }
}

impl Resource for PlaylistTrack {
    const TYPE: &'static str = "track";
    const CLASS: &'static str = "PlaylistTrack";

    fn object(&self) -> &Object {
        &self.track.track.object
    }
}

impl_resource_display!(Track, FullTrack, PlaylistTrack);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::artist::Artist;
    use serde_json::json;

    #[test]
    fn test_duration_formatted() {
        let track = Track {
            duration: Duration::milliseconds(259_947),
            ..Default::default()
        };
        assert_eq!(track.duration_formatted(), "04:19");
    }

    #[test]
    fn test_position_fallback() {
        let track = Track {
            track_number: Some(7),
            ..Default::default()
        };
        assert_eq!(track.position(), None);
        assert_eq!(
            track.position_or(3),
            Some(TrackPosition {
                disc_number: 1,
                track_number: 7
            })
        );
        assert_eq!(Track::default().position_or(3).unwrap().track_number, 4);
        assert_eq!(Track::default().position_or(u32::MAX as usize), None);
        assert_eq!(Track::default().position_or(usize::MAX), None);
    }

    #[test]
    fn test_available_in_defaults_to_empty() {
        let mut track = Track::default();
        assert!(!track.available_in("US"));
        track.available_markets.push("US".to_string());
        assert!(track.available_in("US"));
    }

    #[test]
    fn test_track_display() {
        let track = Track {
            object: Object::new("2EqlS6tkEnglzr7tkKAAYD", "Come Together"),
            artists: vec![Artist::new("1", "The Beatles")],
            ..Default::default()
        };
        assert_eq!(track.to_string(), "Come Together");
        assert_eq!(track.artists_string(", "), "The Beatles");

        let playlist_track = PlaylistTrack {
            track: FullTrack {
                track: Track {
                    object: Object {
                        id: Some("abc".to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
            added_by: Some(json!({ "id": "runie" })),
            ..Default::default()
        };
        assert_eq!(playlist_track.to_string(), "<PlaylistTrack id='abc'>");
        assert_eq!(playlist_track.added_by_id(), Some("runie"));
    }
}
