//! Place-search provider API response types.
//!
//! All types model the JSON structures returned by the provider's REST API.
//! The API wraps every response in a `{"status": "OK", ...}` envelope; the
//! client checks that field before deserializing the payload. Detail payloads
//! are treated as partially populated, always: every field the provider may
//! omit is `#[serde(default)]`.

use serde::{Deserialize, Serialize};

/// Envelope for the `nearbysearch` endpoint: `{"status": ..., "results": [...]}`.
///
/// `results` stays raw JSON; the client parses each record individually and
/// skips any that fail, so one malformed record cannot fail the batch.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// One place as returned by a nearby search for a single keyword.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlaceRecord {
    pub place_id: String,
    pub name: String,
    /// Left as raw JSON: the provider usually sends a number, but the feed
    /// must tolerate strings and junk without failing the whole batch.
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
}

/// A photo reference attached to a search result or detail payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPhoto {
    pub photo_reference: String,
}

/// Envelope for the `details` endpoint: `{"status": ..., "result": {...}}`.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<RawPlaceDetail>,
}

/// Full detail payload for a single place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlaceDetail {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub opening_hours: Option<RawOpeningHours>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// A user review embedded in a detail payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub relative_time_description: Option<String>,
}

/// A place rating: either a numeric star value or the explicit "Not Rated"
/// sentinel emitted when the provider supplies none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Rated(f64),
    NotRated,
}

impl Rating {
    pub const NOT_RATED: &'static str = "Not Rated";

    /// Coerces a raw provider rating into a [`Rating`].
    ///
    /// Numbers and numeric strings parse; anything else (absent, null,
    /// non-numeric text) is treated as unrated.
    #[must_use]
    pub fn from_raw(raw: Option<&serde_json::Value>) -> Self {
        match raw {
            Some(serde_json::Value::Number(n)) => n.as_f64().map_or(Self::NotRated, Self::Rated),
            Some(serde_json::Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_or(Self::NotRated, Self::Rated),
            _ => Self::NotRated,
        }
    }

    /// Numeric value, if rated.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Rated(v) => Some(v),
            Self::NotRated => None,
        }
    }
}

impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Rated(v) => serializer.serialize_f64(*v),
            Self::NotRated => serializer.serialize_str(Self::NOT_RATED),
        }
    }
}
