//! Common types shared across all models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SpoofyError;

/// Maps a URL type (usually `spotify`) to the URL.
pub type ExternalUrls = BTreeMap<String, String>;

/// Maps an ID scheme (`isrc`, `ean`, `upc`) to the ID value.
pub type ExternalIds = BTreeMap<String, String>;

/// Identity fields shared by every API object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Object {
    /// Spotify ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Web API endpoint for the full object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Spotify URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Object {
    /// Create an object with just an ID and a name.
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Debug form: `<Class id='..' name='..'>`, skipping empty fields.
    pub fn repr(&self, class: &str) -> String {
        let mut out = format!("<{}", class);
        if let Some(id) = self.id.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!(" id='{}'", id));
        }
        if let Some(name) = self.name.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!(" name='{}'", name));
        }
        out.push('>');
        out
    }

    /// Display form: the name when set, otherwise the debug form.
    pub fn display(&self, class: &str) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.repr(class),
        }
    }
}

/// Behaviour shared by every type built on an [`Object`].
pub trait Resource {
    /// Plaintext object type, as sent in the `type` field.
    const TYPE: &'static str;

    /// Type name used in the debug form.
    const CLASS: &'static str;

    /// The identity record.
    fn object(&self) -> &Object;

    /// The object's [`TYPE`](Resource::TYPE).
    fn type_tag(&self) -> &'static str {
        Self::TYPE
    }

    /// Spotify ID, if known.
    fn id(&self) -> Option<&str> {
        self.object().id.as_deref()
    }

    /// Display name, if known.
    fn name(&self) -> Option<&str> {
        self.object().name.as_deref()
    }

    /// Web API endpoint for the full object.
    fn href(&self) -> Option<&str> {
        self.object().href.as_deref()
    }

    /// Spotify URI.
    fn uri(&self) -> Option<&str> {
        self.object().uri.as_deref()
    }

    /// Debug form including the type name, ID and name.
    fn repr(&self) -> String {
        self.object().repr(Self::CLASS)
    }
}

/// Implements `Display` for [`Resource`] types: name, or the debug form.
macro_rules! impl_resource_display {
    ($($ty:ty),+ $(,)?) => {$(
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                use $crate::models::common::Resource;
                f.write_str(&self.object().display(<$ty as Resource>::CLASS))
            }
        }
    )+};
}

pub(crate) use impl_resource_display;

/// Image with URL and optional dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Source URL of the image.
    pub url: String,

    /// Width in pixels, if known.
    pub width: Option<u32>,

    /// Height in pixels, if known.
    pub height: Option<u32>,
}

impl Image {
    /// Create a new image.
    pub fn new<S: Into<String>>(url: S, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }

    /// Debug form: `<Image url='..'>`.
    pub fn repr(&self) -> String {
        format!("<Image url='{}'>", self.url)
    }

    /// Pixel area, or zero when a dimension is unknown.
    pub fn area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Copyright statement for an album.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Copyright {
    /// Copyright text.
    pub text: String,

    /// Copyright type: "C" for copyright, "P" for performance.
    #[serde(rename = "type")]
    pub type_: String,
}

/// Follower count of an artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Followers {
    /// Always null in current API responses.
    pub href: Option<String>,

    /// Total number of followers.
    pub total: u64,
}

/// Granularity of a release date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

impl DatePrecision {
    /// strftime-style format for dates of this precision.
    pub fn format(&self) -> &'static str {
        match self {
            DatePrecision::Year => "%Y",
            DatePrecision::Month => "%Y-%m",
            DatePrecision::Day => "%Y-%m-%d",
        }
    }

    /// Name of the precision as it appears in `release_date_precision`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePrecision::Year => "year",
            DatePrecision::Month => "month",
            DatePrecision::Day => "day",
        }
    }
}

impl FromStr for DatePrecision {
    type Err = SpoofyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(DatePrecision::Year),
            "month" => Ok(DatePrecision::Month),
            "day" => Ok(DatePrecision::Day),
            other => Err(SpoofyError::UnknownPrecision(other.to_string())),
        }
    }
}

impl fmt::Display for DatePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading a release date at a given precision.
///
/// An omitted date is represented by the absence of a `ReleaseDate`, so callers
/// can tell "no date" apart from "a date we could not read".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDate {
    /// Calendar date; components finer than the precision default to the first.
    Parsed(NaiveDate),

    /// The raw string did not match the precision's format.
    Malformed(String),
}

impl ReleaseDate {
    /// Parse `raw` using the format for `precision`.
    pub fn parse(raw: &str, precision: DatePrecision) -> Self {
        match Self::parse_date(raw, precision) {
            Some(date) => ReleaseDate::Parsed(date),
            None => ReleaseDate::Malformed(raw.to_string()),
        }
    }

    fn parse_date(raw: &str, precision: DatePrecision) -> Option<NaiveDate> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, raw, StrftimeItems::new(precision.format())).ok()?;

        // Components the format does not carry default to the first.
        if precision == DatePrecision::Year {
            parsed.set_month(1).ok()?;
        }
        if precision != DatePrecision::Day {
            parsed.set_day(1).ok()?;
        }
        parsed.to_naive_date().ok()
    }

    /// The parsed date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ReleaseDate::Parsed(date) => Some(*date),
            ReleaseDate::Malformed(_) => None,
        }
    }

    /// Whether the raw string could not be read at its precision.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ReleaseDate::Malformed(_))
    }
}
