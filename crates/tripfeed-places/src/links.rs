//! Constructed deep links for a place.
//!
//! These URLs are rebuilt fresh on every call; nothing is cached or signed.

use reqwest::Url;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";
const WRITE_REVIEW_BASE: &str = "https://search.google.com/local/writereview";

/// Builds a driving-directions link for a place.
///
/// The destination label falls back to the place id when the provider did not
/// supply a name.
#[must_use]
pub fn map_directions_url(name: Option<&str>, place_id: &str) -> String {
    let destination = name.unwrap_or(place_id);
    with_query(
        DIRECTIONS_BASE,
        &[
            ("api", "1"),
            ("destination", destination),
            ("destination_place_id", place_id),
        ],
    )
}

/// Builds the provider's "write a review" link for a place.
#[must_use]
pub fn write_a_review_url(place_id: &str) -> String {
    with_query(WRITE_REVIEW_BASE, &[("place_id", place_id)])
}

/// Appends percent-encoded query parameters to a base URL.
///
/// The bases above are compile-time constants, so the parse cannot fail in
/// practice; the fallback returns the bare base rather than panicking.
fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().extend_pairs(params);
            String::from(url)
        }
        Err(_) => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_url_uses_name_and_place_id() {
        let url = map_directions_url(Some("Berat Castle"), "pid-123");
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&destination=Berat+Castle&destination_place_id=pid-123"
        );
    }

    #[test]
    fn directions_url_falls_back_to_place_id() {
        let url = map_directions_url(None, "pid-123");
        assert!(url.contains("destination=pid-123"));
        assert!(url.contains("destination_place_id=pid-123"));
    }

    #[test]
    fn directions_url_encodes_special_characters() {
        let url = map_directions_url(Some("Bar & Grill"), "pid-123");
        assert!(
            url.contains("Bar+%26+Grill") || url.contains("Bar%20%26%20Grill"),
            "destination should be percent-encoded: {url}"
        );
    }

    #[test]
    fn write_a_review_url_embeds_place_id() {
        assert_eq!(
            write_a_review_url("pid-9"),
            "https://search.google.com/local/writereview?place_id=pid-9"
        );
    }
}
