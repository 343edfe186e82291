//! Data models for Spotify Web API responses.
//!
//! This module contains the data structures used to represent albums,
//! tracks, artists, images and related metadata.

pub mod album;
pub mod artist;
pub mod common;
mod custom_serde;
pub mod track;

// Re-exports for convenience
pub use album::{Album, FullAlbum, SimpleAlbum};
pub use artist::{Artist, FullArtist, SimpleArtist};
pub use common::{
    Copyright, DatePrecision, ExternalIds, ExternalUrls, Followers, Image, Object, ReleaseDate,
    Resource,
};
pub use track::{FullTrack, PlaylistTrack, SimpleTrack, Track, TrackPosition};
