use std::fmt;

use thiserror::Error;
use url::Url;

/// Identifier the viewer shows in its location for the current sub-image.
pub type DisplayItemId = u64;

/// Collection assumed when the location carries none.
pub const DEFAULT_COLLECTION: &str = "lclma";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location has no display id: {0}")]
    MissingDisplayId(String),
    #[error("location segment `{segment}` is not a number: {value}")]
    InvalidNumber { segment: &'static str, value: String },
}

/// Record identity used for dedup and file naming.
///
/// Locations without a `rec/<n>` segment get a synthetic key derived from the
/// display id they were first seen with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Numbered(u64),
    Synthetic(DisplayItemId),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Numbered(number) => write!(f, "{number}"),
            RecordKey::Synthetic(display_id) => write!(f, "id_{display_id}"),
        }
    }
}

/// Snapshot of one viewer location: `.../collection/<c>/id/<d>[/rec/<r>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub raw: String,
    pub collection: String,
    pub record: RecordKey,
    pub display_id: DisplayItemId,
}

impl Location {
    /// Parses with [`DEFAULT_COLLECTION`] as the collection fallback.
    pub fn parse(raw: &str) -> Result<Self, LocationError> {
        Self::parse_with_default(raw, DEFAULT_COLLECTION)
    }

    pub fn parse_with_default(raw: &str, default_collection: &str) -> Result<Self, LocationError> {
        let segments = path_segments(raw);

        let display_id = match segment_after(&segments, "id") {
            Some(value) => parse_number("id", value)?,
            None => return Err(LocationError::MissingDisplayId(raw.to_string())),
        };
        let record = match segment_after(&segments, "rec") {
            Some(value) => RecordKey::Numbered(parse_number("rec", value)?),
            None => RecordKey::Synthetic(display_id),
        };
        let collection = segment_after(&segments, "collection")
            .unwrap_or(default_collection)
            .to_string();

        Ok(Self {
            raw: raw.to_string(),
            collection,
            record,
            display_id,
        })
    }
}

/// Display id of `raw`, or `None` when the location does not carry one.
pub(crate) fn display_id_of(raw: &str) -> Option<DisplayItemId> {
    let segments = path_segments(raw);
    segment_after(&segments, "id").and_then(|value| value.parse().ok())
}

fn path_segments(raw: &str) -> Vec<String> {
    match Url::parse(raw) {
        Ok(url) => url
            .path_segments()
            .map(|segments| segments.map(ToOwned::to_owned).collect())
            .unwrap_or_default(),
        Err(_) => raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .map(ToOwned::to_owned)
            .collect(),
    }
}

fn segment_after<'a>(segments: &'a [String], key: &str) -> Option<&'a str> {
    segments
        .windows(2)
        .find(|pair| pair[0] == key && !pair[1].is_empty())
        .map(|pair| pair[1].as_str())
}

fn parse_number(segment: &'static str, value: &str) -> Result<u64, LocationError> {
    value.parse().map_err(|_| LocationError::InvalidNumber {
        segment,
        value: value.to_string(),
    })
}
