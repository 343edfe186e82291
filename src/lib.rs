//! # Spoofy
//!
//! Typed models for Spotify Web API responses: albums, tracks, artists and images.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use spoofy::{FromJson, FullAlbum, Resource};
//!
//! fn main() -> Result<(), spoofy::SpoofyError> {
//!     let response = json!({
//!         "id": "0ETFjACtuP2ADo6LFhL6HN",
//!         "name": "Abbey Road",
//!         "album_type": "album",
//!         "release_date": "1969-09-26",
//!         "release_date_precision": "day",
//!         "artists": [{ "id": "3WrFJ7ztbogyGnTHbHJFl2", "name": "The Beatles" }],
//!         "images": [],
//!         "external_urls": {},
//!         "label": "EMI Catalogue"
//!     });
//!
//!     let album = FullAlbum::from_json(&response)?;
//!     println!("{} ({:?})", album, album.album.released_on());
//!     println!("{}", album.repr());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Non-consuming parsing**: responses are read, never modified
//! - **Explicit key sets**: unrecognised keys are ignored, logged or rejected
//!   (see [`ParseOptions`])
//! - **Release dates** that keep "no date" apart from "unreadable date"
//! - **Fill-in capabilities** ([`fill`]) shared by every model with external URLs,
//!   artists, images, tracks or external IDs
//!
//! Network transport is out of scope; implement [`Client`] to enable follow-up
//! calls such as [`Album::load_tracks`].

pub mod client;
pub mod converters;
pub mod error;
pub mod fill;
pub mod models;

pub use client::Client;
pub use converters::{FromJson, ParseOptions, UnknownKeys};
pub use error::{Result, SpoofyError};
pub use models::{
    Album, Artist, DatePrecision, FullAlbum, FullArtist, FullTrack, Image, PlaylistTrack,
    ReleaseDate, Resource, SimpleAlbum, SimpleArtist, SimpleTrack, Track,
};
