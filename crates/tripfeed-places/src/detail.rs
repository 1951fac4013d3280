//! Shaping of raw provider detail payloads into presentation modes.
//!
//! The provider payload is treated as partially populated, always: a missing
//! upstream field is simply absent from the output, never an error.

use serde::Serialize;

use crate::links;
use crate::provider::PlaceProvider;
use crate::types::{RawPlaceDetail, RawReview, Rating};

/// Field-inclusion mode for a shaped place detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    /// Everything the provider supplied: photos, opening hours, directions,
    /// phone, and — when usable reviews exist — the reviews plus a
    /// write-a-review link.
    Full,
    /// Like [`DetailMode::Full`] minus the reviews array, keeping the payload
    /// small for LLM consumption.
    AiCompact,
    /// Card shape for saved places: a single `image` from the first photo,
    /// no photos array, opening hours, directions, phone, or reviews.
    SavedPlaceCompact,
}

impl std::str::FromStr for DetailMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "ai" | "ai-compact" => Ok(Self::AiCompact),
            "saved" | "saved-place-compact" => Ok(Self::SavedPlaceCompact),
            other => Err(format!(
                "unknown detail mode '{other}' (expected full, ai, or saved)"
            )),
        }
    }
}

/// A shaped place detail ready for JSON serialization.
///
/// Optional fields serialize only when present, so the wire payload carries
/// exactly what the mode and the provider allow.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDetail {
    pub place_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_directions_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_a_review_url: Option<String>,
}

/// One usable review: both a text body and a numeric rating are guaranteed.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub rating: f64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<String>,
}

/// Shapes a raw detail payload for the requested mode.
pub(crate) fn shape_detail<P: PlaceProvider + ?Sized>(
    provider: &P,
    place_id: &str,
    tag: Option<&str>,
    city_name: Option<&str>,
    mode: DetailMode,
    raw: &RawPlaceDetail,
) -> PlaceDetail {
    let mut detail = PlaceDetail {
        place_id: place_id.to_owned(),
        name: raw.name.clone(),
        tag: tag.map(str::to_owned),
        city_name: city_name.map(str::to_owned),
        address: raw.formatted_address.clone(),
        rating: Rating::from_raw(raw.rating.as_ref()),
        phone: None,
        photos: None,
        opening_hours: None,
        map_directions_url: None,
        image: None,
        reviews: None,
        write_a_review_url: None,
    };

    match mode {
        DetailMode::SavedPlaceCompact => {
            detail.image = raw
                .photos
                .first()
                .map(|p| provider.photo_url(&p.photo_reference));
        }
        DetailMode::Full | DetailMode::AiCompact => {
            detail.phone = raw
                .formatted_phone_number
                .clone()
                .or_else(|| raw.international_phone_number.clone());
            if !raw.photos.is_empty() {
                detail.photos = Some(
                    raw.photos
                        .iter()
                        .map(|p| provider.photo_url(&p.photo_reference))
                        .collect(),
                );
            }
            detail.opening_hours = raw
                .opening_hours
                .as_ref()
                .filter(|h| !h.weekday_text.is_empty())
                .map(|h| h.weekday_text.clone());
            detail.map_directions_url =
                Some(links::map_directions_url(raw.name.as_deref(), place_id));

            let reviews = usable_reviews(&raw.reviews);
            if !reviews.is_empty() {
                detail.write_a_review_url = Some(links::write_a_review_url(place_id));
                if mode == DetailMode::Full {
                    detail.reviews = Some(reviews);
                }
            }
        }
    }

    detail
}

/// Keeps only reviews carrying both a non-empty text body and a numeric rating.
fn usable_reviews(raw: &[RawReview]) -> Vec<ReviewSummary> {
    raw.iter()
        .filter_map(|review| {
            let text = review.text.as_deref()?.trim();
            if text.is_empty() {
                return None;
            }
            let rating = Rating::from_raw(review.rating.as_ref()).value()?;
            Some(ReviewSummary {
                author_name: review.author_name.clone(),
                rating,
                text: text.to_owned(),
                relative_time: review.relative_time_description.clone(),
            })
        })
        .collect()
}
