//! Feed aggregation over the place-search provider.
//!
//! Turns a set of search interests and a location into a deduplicated,
//! classified collection of place summaries, and builds the capped,
//! detail-enriched candidate set consumed by the AI trip-guide chat flow.
//! The whole pipeline is stateless per call: fan-out search, dedup/filter/
//! classify, optional parallel enrich, optional shuffle, return.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use rand::seq::SliceRandom;
use serde::Serialize;

use tripfeed_core::GeoPoint;

use crate::detail::{shape_detail, DetailMode, PlaceDetail};
use crate::error::PlacesError;
use crate::provider::PlaceProvider;
use crate::types::Rating;

/// Default nearby-search radius in meters.
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 5_000;
/// Default minimum rating for the "popular" bucket (inclusive).
pub const DEFAULT_POPULAR_RATING_THRESHOLD: f64 = 4.5;
/// Default cap on AI candidate places per message.
pub const DEFAULT_MAX_AI_CANDIDATES: usize = 5;
/// Default number of simultaneous detail fetches during candidate enrichment.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 3;

/// Tunable policy knobs for feed aggregation.
#[derive(Debug, Clone)]
pub struct FeedPolicy {
    /// Nearby-search radius in meters.
    pub search_radius_m: u32,
    /// Minimum numeric rating for the "popular" bucket (inclusive boundary).
    pub popular_rating_threshold: f64,
    /// Cap on distinct places collected for the AI candidate set.
    pub max_ai_candidates: usize,
    /// Worker-pool size for concurrent detail fetches.
    pub detail_concurrency: usize,
}

impl Default for FeedPolicy {
    fn default() -> Self {
        Self {
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
            popular_rating_threshold: DEFAULT_POPULAR_RATING_THRESHOLD,
            max_ai_candidates: DEFAULT_MAX_AI_CANDIDATES,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }
}

/// One place in the user feed.
///
/// `tag` is the interest that first surfaced the place; later sightings of
/// the same `place_id` under other interests are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub tag: String,
    pub city_name: String,
    pub image: String,
    pub rating: Rating,
}

/// The categorized feed: highly-rated places and everything else.
#[derive(Debug, Default, Serialize)]
pub struct Feed {
    pub popular: Vec<PlaceSummary>,
    pub recommended: Vec<PlaceSummary>,
}

/// A collected candidate place awaiting detail enrichment.
struct Candidate {
    place_id: String,
    tag: String,
}

/// Aggregates provider search results into feeds and candidate sets.
///
/// Holds only the provider handle and policy between calls; every operation
/// is a self-contained pipeline over request-scoped values.
pub struct FeedAggregator<P> {
    provider: P,
    policy: FeedPolicy,
}

impl<P: PlaceProvider> FeedAggregator<P> {
    pub fn new(provider: P, policy: FeedPolicy) -> Self {
        Self { provider, policy }
    }

    #[must_use]
    pub fn policy(&self) -> &FeedPolicy {
        &self.policy
    }

    /// Builds the popular/recommended feed for a city.
    ///
    /// Issues one nearby search per interest, skips records without photos,
    /// deduplicates by `place_id` across interests (first interest wins the
    /// tag), and buckets by rating: numeric ratings at or above the policy
    /// threshold are "popular", everything else — including unrated and
    /// unparseable ratings — is "recommended".
    ///
    /// When `randomize` is true, each bucket is shuffled independently;
    /// otherwise ordering follows interest-then-provider order and is
    /// deterministic for identical provider responses.
    ///
    /// A search failure for one interest is logged and that interest skipped;
    /// the records it would have contributed are simply absent.
    ///
    /// # Errors
    ///
    /// Returns the last provider error if every interest's search failed.
    pub async fn build_feed(
        &self,
        city_name: &str,
        location: GeoPoint,
        interests: &[String],
        randomize: bool,
    ) -> Result<Feed, PlacesError> {
        let mut feed = Feed::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut failed_interests = 0usize;
        let mut last_err: Option<PlacesError> = None;

        for interest in interests {
            let records = match self
                .provider
                .nearby_search(location, self.policy.search_radius_m, interest)
                .await
            {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(
                        interest = %interest,
                        error = %err,
                        "nearby search failed — skipping interest"
                    );
                    failed_interests += 1;
                    last_err = Some(err);
                    continue;
                }
            };

            for record in records {
                let Some(photo) = record.photos.first() else {
                    // No photo means nothing to render in the feed.
                    continue;
                };
                if !seen.insert(record.place_id.clone()) {
                    continue;
                }

                let image = self.provider.photo_url(&photo.photo_reference);
                let rating = Rating::from_raw(record.rating.as_ref());
                let summary = PlaceSummary {
                    place_id: record.place_id,
                    name: record.name,
                    tag: interest.clone(),
                    city_name: city_name.to_owned(),
                    image,
                    rating,
                };

                if rating
                    .value()
                    .is_some_and(|v| v >= self.policy.popular_rating_threshold)
                {
                    feed.popular.push(summary);
                } else {
                    feed.recommended.push(summary);
                }
            }
        }

        if !interests.is_empty() && failed_interests == interests.len() {
            if let Some(err) = last_err {
                return Err(err);
            }
        }

        if randomize {
            let mut rng = rand::rng();
            feed.popular.shuffle(&mut rng);
            feed.recommended.shuffle(&mut rng);
        }

        Ok(feed)
    }

    /// Builds the capped, detail-enriched candidate set for an AI chat turn.
    ///
    /// Scans `keywords` in order, collecting distinct photo-bearing places
    /// until `max_candidates` is reached; once the cap is hit no further
    /// results or keywords are examined. The collected places are then
    /// enriched with concurrent detail fetches (bounded by the policy's
    /// worker-pool size) in ai-compact shape. Output order is completion
    /// order — callers must not depend on it.
    ///
    /// A failed detail fetch drops that candidate; the call returns whatever
    /// subset succeeded.
    ///
    /// # Errors
    ///
    /// Returns the last provider error if every keyword's search failed.
    pub async fn build_ai_candidate_set(
        &self,
        city_name: &str,
        location: GeoPoint,
        keywords: &[String],
        max_candidates: usize,
    ) -> Result<Vec<PlaceDetail>, PlacesError> {
        let candidates = self
            .collect_candidates(location, keywords, max_candidates)
            .await?;

        let details: Vec<Option<PlaceDetail>> = stream::iter(candidates)
            .map(|candidate| async move {
                match self
                    .fetch_place_detail(
                        &candidate.place_id,
                        Some(&candidate.tag),
                        Some(city_name),
                        DetailMode::AiCompact,
                    )
                    .await
                {
                    Ok(detail) => Some(detail),
                    Err(err) => {
                        tracing::warn!(
                            place_id = %candidate.place_id,
                            error = %err,
                            "detail fetch failed — dropping candidate"
                        );
                        None
                    }
                }
            })
            .buffer_unordered(self.policy.detail_concurrency.max(1))
            .collect()
            .await;

        Ok(details.into_iter().flatten().collect())
    }

    /// Fetches and shapes one place's detail payload.
    ///
    /// `tag` and `city_name` are passed through to the output when supplied.
    /// Missing optional upstream fields are simply absent from the output.
    ///
    /// # Errors
    ///
    /// Propagates any provider error; callers decide whether "no detail
    /// available" is fatal.
    pub async fn fetch_place_detail(
        &self,
        place_id: &str,
        tag: Option<&str>,
        city_name: Option<&str>,
        mode: DetailMode,
    ) -> Result<PlaceDetail, PlacesError> {
        let raw = self.provider.place_details(place_id).await?;
        Ok(shape_detail(
            &self.provider,
            place_id,
            tag,
            city_name,
            mode,
            &raw,
        ))
    }

    /// Collects up to `cap` distinct photo-bearing places across keywords.
    ///
    /// Both loops short-circuit deterministically once the cap is reached:
    /// the result-scan breaks mid-page, and keywords whose search would start
    /// after the cap are never queried.
    async fn collect_candidates(
        &self,
        location: GeoPoint,
        keywords: &[String],
        cap: usize,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut failed_keywords = 0usize;
        let mut last_err: Option<PlacesError> = None;

        for keyword in keywords {
            if candidates.len() >= cap {
                break;
            }

            let records = match self
                .provider
                .nearby_search(location, self.policy.search_radius_m, keyword)
                .await
            {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(
                        keyword = %keyword,
                        error = %err,
                        "nearby search failed — skipping keyword"
                    );
                    failed_keywords += 1;
                    last_err = Some(err);
                    continue;
                }
            };

            for record in records {
                if record.photos.is_empty() {
                    continue;
                }
                if !seen.insert(record.place_id.clone()) {
                    continue;
                }
                candidates.push(Candidate {
                    place_id: record.place_id,
                    tag: keyword.clone(),
                });
                if candidates.len() >= cap {
                    break;
                }
            }
        }

        if !keywords.is_empty() && failed_keywords == keywords.len() {
            if let Some(err) = last_err {
                return Err(err);
            }
        }

        Ok(candidates)
    }
}
