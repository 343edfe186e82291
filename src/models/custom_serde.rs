//! Custom serialization methods used by the models.

/// Serializes a position-keyed track map as a plain list in position order,
/// and rebuilds the map from such a list.
pub mod position_map {
    use std::collections::BTreeMap;

    use serde::ser::SerializeSeq;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::fill::merge_tracks;
    use crate::models::track::{SimpleTrack, TrackPosition};

    pub fn serialize<S>(
        tracks: &BTreeMap<TrackPosition, SimpleTrack>,
        s: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = s.serialize_seq(Some(tracks.len()))?;
        for track in tracks.values() {
            seq.serialize_element(track)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(d: D) -> Result<BTreeMap<TrackPosition, SimpleTrack>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tracks = Vec::<SimpleTrack>::deserialize(d)?;
        let mut map = BTreeMap::new();
        merge_tracks(&mut map, tracks, 0).map_err(de::Error::custom)?;
        Ok(map)
    }
}

/// `chrono::Duration` as whole milliseconds.
pub mod duration_ms {
    use chrono::Duration;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_i64(duration.num_milliseconds())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = i64::deserialize(d)?;
        Duration::try_milliseconds(ms).ok_or_else(|| {
            de::Error::invalid_value(
                de::Unexpected::Signed(ms),
                &"a valid duration in milliseconds",
            )
        })
    }
}
