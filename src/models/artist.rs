//! Artist-related models.

use serde::{Deserialize, Serialize};

use super::common::{impl_resource_display, ExternalUrls, Followers, Image, Object, Resource};

/// An artist as it appears nested in albums and tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artist {
    /// Identity fields.
    #[serde(flatten)]
    pub object: Object,

    /// Known external URLs for this artist.
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Alias of [`Artist`].
pub type SimpleArtist = Artist;

impl Artist {
    /// Create a new artist with ID and name.
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            object: Object::new(id, name),
            ..Default::default()
        }
    }

    /// Spotify web URL, if the response carried one.
    pub fn link(&self) -> Option<&str> {
        self.external_urls.get("spotify").map(String::as_str)
    }
}

impl Resource for Artist {
    const TYPE: &'static str = "artist";
    const CLASS: &'static str = "Artist";

    fn object(&self) -> &Object {
        &self.object
    }
}

/// A complete artist record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullArtist {
    #[serde(flatten)]
    pub artist: Artist,

    /// Follower information.
    pub followers: Option<Followers>,

    /// Genres associated with the artist.
    #[serde(default)]
    pub genres: Vec<String>,

    /// Artist images in various sizes.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Popularity between 0 and 100.
    pub popularity: Option<u32>,
}

impl FullArtist {
    /// Get the largest image available.
    pub fn largest_image(&self) -> Option<&Image> {
        self.images.iter().max_by_key(|img| img.area())
    }

    /// Total follower count, zero when followers are unknown.
    pub fn follower_count(&self) -> u64 {
        self.followers.as_ref().map(|f| f.total).unwrap_or(0)
    }
}

impl Resource for FullArtist {
    const TYPE: &'static str = "artist";
    const CLASS: &'static str = "FullArtist";

    fn object(&self) -> &Object {
        &self.artist.object
    }
}

impl_resource_display!(Artist, FullArtist);
