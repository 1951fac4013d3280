//! HTTP client for the Google Places REST API.
//!
//! Wraps `reqwest` with provider-specific error handling, API key management,
//! and typed response deserialization. All endpoints check the `"status"`
//! field in the JSON envelope: `OK` and `ZERO_RESULTS` are success,
//! `OVER_QUERY_LIMIT` surfaces as [`PlacesError::QuotaExceeded`], and anything
//! else as [`PlacesError::Api`]. Transient failures (timeouts, connect errors,
//! 5xx) are retried with exponential back-off.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use tripfeed_core::GeoPoint;

use crate::error::PlacesError;
use crate::provider::PlaceProvider;
use crate::retry::retry_with_backoff;
use crate::types::{NearbySearchResponse, PlaceDetailsResponse, RawPlaceDetail, RawPlaceRecord};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Width requested for constructed photo URLs.
const PHOTO_MAX_WIDTH: u32 = 400;

/// Client for the Google Places REST API.
///
/// Manages the HTTP client, API key, and endpoint URLs. Use
/// [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    nearby_url: Url,
    details_url: Url,
    photo_endpoint: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    backoff_base_ms: u64,
}

impl GooglePlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tripfeed/0.1 (tourism-backend)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join treats it as a directory rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let nearby_url = base
            .join("nearbysearch/json")
            .map_err(|e| invalid(e.to_string()))?;
        let details_url = base
            .join("details/json")
            .map_err(|e| invalid(e.to_string()))?;
        let photo_endpoint = base.join("photo").map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            nearby_url,
            details_url,
            photo_endpoint,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a full request URL with properly percent-encoded query parameters.
    ///
    /// Clones the endpoint URL and appends `key` plus any additional parameters
    /// via [`Url::query_pairs_mut`], ensuring all values are safely encoded.
    fn build_url(&self, endpoint: &Url, extra: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request with retry on transient errors, asserts a 2xx HTTP
    /// status, and parses the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] on network failure or a non-2xx status
    /// after all retries are exhausted. Returns [`PlacesError::Deserialize`]
    /// if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                let response = response.error_for_status()?;
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                    context: url.to_string(),
                    source: e,
                })
            }
        })
        .await
    }

    /// Checks the top-level `"status"` field and returns an error if it
    /// indicates failure. `ZERO_RESULTS` is a successful empty response.
    fn check_api_status(body: &serde_json::Value) -> Result<(), PlacesError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("MISSING_STATUS");
        if status == "OK" || status == "ZERO_RESULTS" {
            return Ok(());
        }

        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();

        if status == "OVER_QUERY_LIMIT" {
            return Err(PlacesError::QuotaExceeded(message));
        }
        Err(PlacesError::Api {
            status: status.to_owned(),
            message,
        })
    }
}

#[async_trait]
impl PlaceProvider for GooglePlacesClient {
    async fn nearby_search(
        &self,
        location: GeoPoint,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<RawPlaceRecord>, PlacesError> {
        let location_param = format!("{},{}", location.latitude, location.longitude);
        let url = self.build_url(
            &self.nearby_url,
            &[
                ("location", &location_param),
                ("radius", &radius_m.to_string()),
                ("keyword", keyword),
            ],
        );
        let body = self.request_json(&url).await?;
        Self::check_api_status(&body)?;

        let envelope: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(keyword={keyword})"),
                source: e,
            })?;

        // Parse records one by one: a single malformed entry is skipped
        // rather than failing the whole page.
        let records = envelope
            .results
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawPlaceRecord>(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(keyword, error = %err, "skipping malformed place record");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    async fn place_details(&self, place_id: &str) -> Result<RawPlaceDetail, PlacesError> {
        let url = self.build_url(&self.details_url, &[("place_id", place_id)]);
        let body = self.request_json(&url).await?;
        Self::check_api_status(&body)?;

        let envelope: PlaceDetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;

        Ok(envelope.result.unwrap_or_default())
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        self.build_url(
            &self.photo_endpoint,
            &[
                ("maxwidth", &PHOTO_MAX_WIDTH.to_string()),
                ("photo_reference", photo_reference),
            ],
        )
        .into()
    }
}
