//! JSON to model converters.
//!
//! This module turns raw Spotify Web API JSON into the typed model structures.
//! Reads never modify the input. Each model declares the keys it recognises;
//! anything else is ignored, logged or rejected depending on [`ParseOptions`].

mod album;
mod artist;
mod track;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SpoofyError};
use crate::models::{
    Album, Artist, FullAlbum, FullArtist, FullTrack, Image, Object, PlaylistTrack, Track,
};

pub use album::{parse_album, parse_full_album};
pub use artist::{parse_artist, parse_full_artist, parse_image};
pub use track::{parse_full_track, parse_playlist_track, parse_track};

/// Keys read into [`Object`] by every model. `type` is recognised but not stored.
pub(crate) const OBJECT_KEYS: &[&str] = &["id", "name", "href", "uri", "type"];

static NULL: Value = Value::Null;

/// What to do with keys a model does not recognise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Drop them silently.
    Ignore,
    /// Drop them and emit a `debug` event naming them.
    #[default]
    Log,
    /// Fail the parse with [`SpoofyError::UnrecognizedKeys`].
    Reject,
}

/// Parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Policy for unrecognised keys.
    #[serde(default)]
    pub unknown_keys: UnknownKeys,
}

impl ParseOptions {
    /// Options that reject any unrecognised key.
    pub fn strict() -> Self {
        Self {
            unknown_keys: UnknownKeys::Reject,
        }
    }

    /// Set the unknown-key policy.
    pub fn with_unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }
}

/// Models that can be built from a decoded API response.
pub trait FromJson: Sized {
    /// Parse `json` with explicit options.
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self>;

    /// Parse `json` with default options.
    fn from_json(json: &Value) -> Result<Self> {
        Self::from_json_with(json, &ParseOptions::default())
    }

    /// Decode and parse JSON text with default options.
    fn from_json_str(text: &str) -> Result<Self> {
        let json: Value = serde_json::from_str(text)?;
        Self::from_json(&json)
    }
}

impl FromJson for Album {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_album(json, options)
    }
}

impl FromJson for FullAlbum {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_full_album(json, options)
    }
}

impl FromJson for Track {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_track(json, options)
    }
}

impl FromJson for FullTrack {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_full_track(json, options)
    }
}

impl FromJson for PlaylistTrack {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_playlist_track(json, options)
    }
}

impl FromJson for Artist {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_artist(json, options)
    }
}

impl FromJson for FullArtist {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_full_artist(json, options)
    }
}

impl FromJson for Image {
    fn from_json_with(json: &Value, options: &ParseOptions) -> Result<Self> {
        parse_image(json, options)
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read-only view over one response object.
pub(crate) struct Fields<'a> {
    kind: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(kind: &'static str, json: &'a Value) -> Result<Self> {
        match json.as_object() {
            Some(map) => Ok(Self { kind, map }),
            None => Err(SpoofyError::NotAnObject {
                kind,
                found: json_type_name(json),
            }),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        self.kind
    }

    /// Value for `key`, `Null` when missing.
    pub(crate) fn value(&self, key: &str) -> &'a Value {
        self.map.get(key).unwrap_or(&NULL)
    }

    /// Value for `key`; the key must be present but the value may be null.
    pub(crate) fn required(&self, key: &'static str) -> Result<&'a Value> {
        self.map.get(key).ok_or(SpoofyError::MissingField {
            kind: self.kind,
            field: key,
        })
    }

    fn invalid(&self, key: &str, expected: &'static str) -> SpoofyError {
        SpoofyError::InvalidField {
            kind: self.kind,
            field: key.to_string(),
            expected,
        }
    }

    /// Get string from JSON; missing and null are both `None`.
    pub(crate) fn opt_str(&self, key: &str) -> Result<Option<String>> {
        match self.value(key) {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(self.invalid(key, "a string")),
        }
    }

    pub(crate) fn required_str(&self, key: &'static str) -> Result<Option<String>> {
        self.required(key)?;
        self.opt_str(key)
    }

    /// Get string ID from JSON (handles both string and numeric IDs).
    pub(crate) fn opt_id(&self, key: &str) -> Result<Option<String>> {
        match self.value(key) {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            _ => Err(self.invalid(key, "a string")),
        }
    }

    pub(crate) fn opt_u32(&self, key: &str) -> Result<Option<u32>> {
        match self.value(key) {
            Value::Null => Ok(None),
            v => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a non-negative integer")),
        }
    }

    pub(crate) fn required_u32(&self, key: &'static str) -> Result<Option<u32>> {
        self.required(key)?;
        self.opt_u32(key)
    }

    pub(crate) fn opt_i64(&self, key: &str) -> Result<Option<i64>> {
        match self.value(key) {
            Value::Null => Ok(None),
            v => v
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "an integer")),
        }
    }

    pub(crate) fn opt_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.value(key) {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            _ => Err(self.invalid(key, "a boolean")),
        }
    }

    /// Get a list of strings; missing and null are both `None`.
    pub(crate) fn opt_str_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.value(key) {
            Value::Null => Ok(None),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| self.invalid(key, "a list of strings"))
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            _ => Err(self.invalid(key, "a list of strings")),
        }
    }

    /// Deserialize a structured field with serde; missing and null are both `None`.
    pub(crate) fn opt_typed<T>(&self, key: &str, expected: &'static str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.value(key) {
            Value::Null => Ok(None),
            v => T::deserialize(v)
                .map(Some)
                .map_err(|source| SpoofyError::MalformedField {
                    kind: self.kind,
                    field: key.to_string(),
                    expected,
                    source,
                }),
        }
    }

    /// Apply the unknown-key policy against the union of `known` key sets.
    pub(crate) fn check_keys(&self, known: &[&[&str]], options: &ParseOptions) -> Result<()> {
        if options.unknown_keys == UnknownKeys::Ignore {
            return Ok(());
        }

        let unknown: Vec<String> = self
            .map
            .keys()
            .filter(|key| !known.iter().any(|set| set.contains(&key.as_str())))
            .cloned()
            .collect();

        if unknown.is_empty() {
            return Ok(());
        }

        match options.unknown_keys {
            UnknownKeys::Reject => Err(SpoofyError::UnrecognizedKeys {
                kind: self.kind,
                keys: unknown,
            }),
            UnknownKeys::Log | UnknownKeys::Ignore => {
                debug!("{}: ignoring unrecognized keys {:?}", self.kind, unknown);
                Ok(())
            }
        }
    }
}

/// Read the identity fields shared by every model.
pub(crate) fn parse_object(fields: &Fields<'_>) -> Result<Object> {
    Ok(Object {
        id: fields.opt_id("id")?,
        name: fields.opt_str("name")?,
        href: fields.opt_str("href")?,
        uri: fields.opt_str("uri")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_defaults_to_absent() {
        let json = json!({});
        let fields = Fields::new("Album", &json).unwrap();
        assert_eq!(parse_object(&fields).unwrap(), Object::default());
    }

    #[test]
    fn test_parse_object_numeric_id() {
        let json = json!({ "id": 12345, "name": "Test" });
        let fields = Fields::new("Album", &json).unwrap();
        let object = parse_object(&fields).unwrap();
        assert_eq!(object.id.as_deref(), Some("12345"));
        assert_eq!(object.name.as_deref(), Some("Test"));
    }

    #[test]
    fn test_fields_rejects_non_object() {
        let json = json!([1, 2, 3]);
        let err = Fields::new("Album", &json).err().unwrap();
        assert!(matches!(
            err,
            SpoofyError::NotAnObject {
                kind: "Album",
                found: "an array"
            }
        ));
    }

    #[test]
    fn test_required_vs_null() {
        let json = json!({ "album_type": null });
        let fields = Fields::new("Album", &json).unwrap();
        assert_eq!(fields.required_str("album_type").unwrap(), None);
        assert!(fields.required_str("label").unwrap_err().is_missing_field());
    }

    #[test]
    fn test_wrong_type_is_invalid_field() {
        let json = json!({ "name": 5, "popularity": -1, "genres": ["rock", 3] });
        let fields = Fields::new("FullAlbum", &json).unwrap();
        assert!(matches!(
            fields.opt_str("name"),
            Err(SpoofyError::InvalidField { .. })
        ));
        assert!(fields.opt_u32("popularity").is_err());
        assert!(fields.opt_str_list("genres").is_err());
    }

    #[test]
    fn test_check_keys_policies() {
        let json = json!({ "id": "1", "mystery": true });
        let fields = Fields::new("Artist", &json).unwrap();
        let known: &[&[&str]] = &[OBJECT_KEYS];

        assert!(fields.check_keys(known, &ParseOptions::default()).is_ok());
        assert!(fields
            .check_keys(
                known,
                &ParseOptions::default().with_unknown_keys(UnknownKeys::Ignore)
            )
            .is_ok());

        match fields.check_keys(known, &ParseOptions::strict()) {
            Err(SpoofyError::UnrecognizedKeys { kind, keys }) => {
                assert_eq!(kind, "Artist");
                assert_eq!(keys, vec!["mystery".to_string()]);
            }
            other => panic!("expected UnrecognizedKeys, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_str() {
        let artist = Artist::from_json_str(r#"{"id": "1", "name": "Nina Simone"}"#).unwrap();
        assert_eq!(artist.object.name.as_deref(), Some("Nina Simone"));
        assert!(Artist::from_json_str("{not json").is_err());
    }
}
