//! Album converters.

use serde_json::Value;
use tracing::debug;

use super::{parse_object, Fields, ParseOptions, OBJECT_KEYS};
use crate::error::Result;
use crate::fill::{fill_artists, fill_external_ids, fill_external_urls, fill_images, fill_tracks};
use crate::models::{Album, Copyright, DatePrecision, FullAlbum, ReleaseDate, Resource};

const ALBUM_KEYS: &[&str] = &[
    "album_group",
    "album_type",
    "available_markets",
    "release_date",
    "release_date_precision",
    "external_urls",
    "artists",
    "images",
    "tracks",
    "total_tracks",
    "restrictions",
];

const FULL_ALBUM_KEYS: &[&str] = &["genres", "label", "popularity", "copyrights", "external_ids"];

/// Read `release_date_precision` and, when it is set, `release_date`.
fn parse_release(fields: &Fields<'_>) -> Result<(Option<DatePrecision>, Option<ReleaseDate>)> {
    let precision = match fields.required_str("release_date_precision")? {
        Some(precision) => precision.parse::<DatePrecision>()?,
        None => return Ok((None, None)),
    };

    let date = fields.required_str("release_date")?.map(|raw| {
        let date = ReleaseDate::parse(&raw, precision);
        if date.is_malformed() {
            debug!(
                "{}: release date {:?} does not match precision {}",
                fields.kind(),
                raw,
                precision
            );
        }
        date
    });

    Ok((Some(precision), date))
}

/// Fields shared by simple and full albums; no key check.
fn album_fields(fields: &Fields<'_>, options: &ParseOptions) -> Result<Album> {
    let album_type = fields.required_str("album_type")?;
    let (release_date_precision, release_date) = parse_release(fields)?;

    let mut album = Album {
        object: parse_object(fields)?,
        album_group: fields.opt_str("album_group")?,
        album_type,
        available_markets: fields.opt_str_list("available_markets")?,
        total_tracks: fields.opt_u32("total_tracks")?,
        release_date,
        release_date_precision,
        ..Default::default()
    };

    fill_external_urls(&mut album, fields.value("external_urls"))?;
    fill_artists(&mut album, fields.value("artists"), options)?;
    fill_images(&mut album, fields.value("images"), options)?;
    fill_tracks(&mut album, fields.value("tracks"), options)?;

    Ok(album)
}

/// Parse a simplified album object.
pub fn parse_album(json: &Value, options: &ParseOptions) -> Result<Album> {
    let fields = Fields::new(Album::CLASS, json)?;
    fields.check_keys(&[OBJECT_KEYS, ALBUM_KEYS], options)?;
    album_fields(&fields, options)
}

/// Parse a full album object, as returned by the album endpoint.
pub fn parse_full_album(json: &Value, options: &ParseOptions) -> Result<FullAlbum> {
    let fields = Fields::new(FullAlbum::CLASS, json)?;
    fields.check_keys(&[OBJECT_KEYS, ALBUM_KEYS, FULL_ALBUM_KEYS], options)?;

    let mut album = FullAlbum {
        album: album_fields(&fields, options)?,
        genres: fields.opt_str_list("genres")?,
        label: fields.opt_str("label")?,
        popularity: fields.opt_u32("popularity")?,
        copyrights: fields.opt_typed::<Vec<Copyright>>("copyrights", "a list of copyrights")?,
        ..Default::default()
    };

    fill_external_ids(&mut album, fields.value("external_ids"))?;

    Ok(album)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpoofyError;
    use chrono::NaiveDate;
    use serde_json::json;

    fn abbey_road() -> Value {
        json!({
            "album_type": "album",
            "artists": [{
                "external_urls": { "spotify": "https://open.spotify.com/artist/3WrFJ7ztbogyGnTHbHJFl2" },
                "href": "https://api.spotify.com/v1/artists/3WrFJ7ztbogyGnTHbHJFl2",
                "id": "3WrFJ7ztbogyGnTHbHJFl2",
                "name": "The Beatles",
                "type": "artist",
                "uri": "spotify:artist:3WrFJ7ztbogyGnTHbHJFl2"
            }],
            "external_urls": { "spotify": "https://open.spotify.com/album/0ETFjACtuP2ADo6LFhL6HN" },
            "href": "https://api.spotify.com/v1/albums/0ETFjACtuP2ADo6LFhL6HN",
            "id": "0ETFjACtuP2ADo6LFhL6HN",
            "images": [
                { "height": 640, "url": "https://i.scdn.co/image/ab67616d0000b273dc30583ba717007b00cceb25", "width": 640 },
                { "height": 64, "url": "https://i.scdn.co/image/ab67616d00004851dc30583ba717007b00cceb25", "width": 64 }
            ],
            "name": "Abbey Road (Remastered)",
            "release_date": "1969-09-26",
            "release_date_precision": "day",
            "type": "album",
            "uri": "spotify:album:0ETFjACtuP2ADo6LFhL6HN"
        })
    }

    fn with(mut json: Value, key: &str, value: Value) -> Value {
        json[key] = value;
        json
    }

    fn without(mut json: Value, key: &str) -> Value {
        json.as_object_mut().unwrap().remove(key);
        json
    }

    #[test]
    fn test_parse_album() {
        let album = parse_album(&abbey_road(), &ParseOptions::strict()).unwrap();

        assert_eq!(album.id(), Some("0ETFjACtuP2ADo6LFhL6HN"));
        assert_eq!(album.to_string(), "Abbey Road (Remastered)");
        assert_eq!(album.album_type.as_deref(), Some("album"));
        assert_eq!(album.release_date_precision, Some(DatePrecision::Day));
        assert_eq!(album.released_on(), NaiveDate::from_ymd_opt(1969, 9, 26));
        assert_eq!(album.primary_artist(), Some("The Beatles"));
        assert_eq!(album.images.len(), 2);
        assert_eq!(album.largest_image().unwrap().width, Some(640));
        assert_eq!(
            album.link(),
            Some("https://open.spotify.com/album/0ETFjACtuP2ADo6LFhL6HN")
        );
        assert!(album.tracks.is_empty());
    }

    #[test]
    fn test_parse_album_does_not_modify_input() {
        let json = abbey_road();
        let before = json.clone();
        parse_full_album(&json, &ParseOptions::default()).unwrap();
        assert_eq!(json, before);
    }

    #[test]
    fn test_optional_fields_absent() {
        let album = parse_full_album(&abbey_road(), &ParseOptions::default()).unwrap();

        assert_eq!(album.album.album_group, None);
        assert_eq!(album.album.available_markets, None);
        assert_eq!(album.genres, None);
        assert_eq!(album.label, None);
        assert_eq!(album.popularity, None);
        assert_eq!(album.copyrights, None);
        assert!(album.external_ids.is_empty());
    }

    #[test]
    fn test_missing_album_type_fails() {
        let err = parse_album(&without(abbey_road(), "album_type"), &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SpoofyError::MissingField {
                kind: "Album",
                field: "album_type"
            }
        ));
    }

    #[test]
    fn test_missing_precision_fails() {
        let err = parse_album(
            &without(abbey_road(), "release_date_precision"),
            &ParseOptions::default(),
        )
        .unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_null_precision_skips_date() {
        let json = with(abbey_road(), "release_date_precision", Value::Null);
        let album = parse_album(&json, &ParseOptions::default()).unwrap();
        assert_eq!(album.release_date_precision, None);
        assert_eq!(album.release_date, None);
    }

    #[test]
    fn test_year_precision() {
        let json = with(
            with(abbey_road(), "release_date_precision", json!("year")),
            "release_date",
            json!("2021"),
        );
        let album = parse_album(&json, &ParseOptions::default()).unwrap();
        assert_eq!(album.released_on(), NaiveDate::from_ymd_opt(2021, 1, 1));
    }

    #[test]
    fn test_day_precision() {
        let json = with(abbey_road(), "release_date", json!("2021-03-05"));
        let album = parse_album(&json, &ParseOptions::default()).unwrap();
        assert_eq!(
            album.release_date,
            Some(ReleaseDate::Parsed(NaiveDate::from_ymd_opt(2021, 3, 5).unwrap()))
        );
    }

    #[test]
    fn test_malformed_date_does_not_fail() {
        let json = with(abbey_road(), "release_date", json!("not-a-date"));
        let album = parse_album(&json, &ParseOptions::default()).unwrap();
        assert_eq!(album.released_on(), None);
        assert_eq!(
            album.release_date,
            Some(ReleaseDate::Malformed("not-a-date".to_string()))
        );
    }

    #[test]
    fn test_unknown_precision_fails() {
        let json = with(abbey_road(), "release_date_precision", json!("decade"));
        let err = parse_album(&json, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, SpoofyError::UnknownPrecision(p) if p == "decade"));
    }

    #[test]
    fn test_parse_full_album() {
        let json = with(
            with(
                with(abbey_road(), "label", json!("EMI Catalogue")),
                "popularity",
                json!(79),
            ),
            "copyrights",
            json!([
                { "text": "© 2015 Apple Corps Ltd", "type": "C" },
                { "text": "℗ 2015 Calderstone Productions Limited", "type": "P" }
            ]),
        );
        let json = with(json, "genres", json!([]));
        let json = with(json, "external_ids", json!({ "upc": "00602547670064" }));

        let album = parse_full_album(&json, &ParseOptions::strict()).unwrap();

        assert_eq!(album.label.as_deref(), Some("EMI Catalogue"));
        assert_eq!(album.popularity, Some(79));
        assert_eq!(album.genres, Some(vec![]));
        assert_eq!(album.copyrights.as_ref().map(Vec::len), Some(2));
        assert_eq!(album.copyrights.as_ref().unwrap()[1].type_, "P");
        assert_eq!(album.upc(), Some("00602547670064"));
        assert_eq!(album.repr(), "<FullAlbum id='0ETFjACtuP2ADo6LFhL6HN' name='Abbey Road (Remastered)'>");
    }

    #[test]
    fn test_bad_copyrights_report_detail() {
        let json = with(abbey_road(), "copyrights", json!([{ "text": "© 2015 Apple Corps Ltd" }]));
        let err = parse_full_album(&json, &ParseOptions::default()).unwrap_err();
        match err {
            SpoofyError::MalformedField { field, source, .. } => {
                assert_eq!(field, "copyrights");
                assert!(source.to_string().contains("type"));
            }
            other => panic!("expected MalformedField, got {:?}", other),
        }
    }

    #[test]
    fn test_embedded_track_page() {
        let json = with(
            abbey_road(),
            "tracks",
            json!({
                "href": "https://api.spotify.com/v1/albums/0ETFjACtuP2ADo6LFhL6HN/tracks",
                "items": [{
                    "artists": [], "disc_number": 1, "duration_ms": 259947,
                    "external_urls": {}, "id": "2EqlS6tkEnglzr7tkKAAYD",
                    "name": "Come Together", "track_number": 1, "type": "track"
                }],
                "limit": 50, "offset": 0, "total": 17
            }),
        );

        let album = parse_album(&json, &ParseOptions::default()).unwrap();
        assert_eq!(album.tracks.len(), 1);
        assert_eq!(album.tracks_for_disc(1)[0].to_string(), "Come Together");
    }

    #[test]
    fn test_missing_album_type_reported_before_precision() {
        let json = without(without(abbey_road(), "album_type"), "release_date_precision");
        let err = parse_album(&json, &ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SpoofyError::MissingField {
                field: "album_type",
                ..
            }
        ));
    }

    #[test]
    fn test_precision_without_release_date_key_fails() {
        let err = parse_album(&without(abbey_road(), "release_date"), &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SpoofyError::MissingField {
                kind: "Album",
                field: "release_date"
            }
        ));
    }

    #[test]
    fn test_null_release_date_is_absent() {
        let json = with(abbey_road(), "release_date", Value::Null);
        let album = parse_album(&json, &ParseOptions::default()).unwrap();
        assert_eq!(album.release_date_precision, Some(DatePrecision::Day));
        assert_eq!(album.release_date, None);
    }

    #[test]
    fn test_strict_accepts_documented_album_keys() {
        let json = with(abbey_road(), "total_tracks", json!(17));
        let json = with(json, "restrictions", json!({ "reason": "market" }));

        let album = parse_album(&json, &ParseOptions::strict()).unwrap();
        assert_eq!(album.total_tracks, Some(17));
    }

    #[test]
    fn test_strict_rejects_unknown_keys() {
        let json = with(abbey_road(), "release_year", json!(1969));

        assert!(parse_album(&json, &ParseOptions::default()).is_ok());
        let err = parse_album(&json, &ParseOptions::strict()).unwrap_err();
        assert!(matches!(err, SpoofyError::UnrecognizedKeys { .. }));
    }

    #[test]
    fn test_simple_album_reports_full_album_keys() {
        let json = with(abbey_road(), "label", json!("EMI"));
        let err = parse_album(&json, &ParseOptions::strict()).unwrap_err();
        match err {
            SpoofyError::UnrecognizedKeys { kind, keys } => {
                assert_eq!(kind, "Album");
                assert_eq!(keys, vec!["label".to_string()]);
            }
            other => panic!("expected UnrecognizedKeys, got {:?}", other),
        }
    }
}
