//! Error types for parsing Spotify Web API responses.

use thiserror::Error;

/// Main error type for all model parsing and follow-up operations.
#[derive(Debug, Error)]
pub enum SpoofyError {
    /// A required key was not present in the response object.
    #[error("{kind}: missing required field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A key was present but its value had the wrong JSON type.
    #[error("{kind}: field `{field}` should be {expected}")]
    InvalidField {
        kind: &'static str,
        field: String,
        expected: &'static str,
    },

    /// A structured field could not be deserialized.
    #[error("{kind}: field `{field}` should be {expected}: {source}")]
    MalformedField {
        kind: &'static str,
        field: String,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The value handed to a parser was not a JSON object.
    #[error("{kind}: expected a JSON object, found {found}")]
    NotAnObject {
        kind: &'static str,
        found: &'static str,
    },

    /// `release_date_precision` held something other than year, month or day.
    #[error("Unknown release date precision: {0}")]
    UnknownPrecision(String),

    /// A timestamp field could not be parsed.
    #[error("Invalid timestamp in `{field}`: {value}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Keys outside the recognised set were found and the policy is to reject them.
    #[error("{kind}: unrecognized keys: {}", keys.join(", "))]
    UnrecognizedKeys { kind: &'static str, keys: Vec<String> },

    /// A follow-up call needs the object's ID but it has none.
    #[error("{0} has no ID")]
    MissingId(&'static str),

    /// The client collaborator failed to fetch data.
    #[error("Client error: {0}")]
    ClientError(String),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SpoofyError {
    /// Whether this error reports a missing required key.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, SpoofyError::MissingField { .. })
    }
}

/// Result type alias for spoofy operations.
pub type Result<T> = std::result::Result<T, SpoofyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = SpoofyError::MissingField {
            kind: "Album",
            field: "album_type",
        };
        assert_eq!(err.to_string(), "Album: missing required field `album_type`");
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_unrecognized_keys_message() {
        let err = SpoofyError::UnrecognizedKeys {
            kind: "Image",
            keys: vec!["foo".to_string(), "bar".to_string()],
        };
        assert_eq!(err.to_string(), "Image: unrecognized keys: foo, bar");
        assert!(!err.is_missing_field());
    }

    #[test]
    fn test_malformed_field_keeps_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<u64>("\"many\"").unwrap_err();
        let err = SpoofyError::MalformedField {
            kind: "FullArtist",
            field: "followers".to_string(),
            expected: "a followers object",
            source,
        };
        assert!(err
            .to_string()
            .starts_with("FullArtist: field `followers` should be a followers object: "));
        assert!(err.source().is_some());
    }
}
