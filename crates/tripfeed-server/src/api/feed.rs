use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use tripfeed_places::Feed;

use crate::middleware::RequestId;

use super::{map_places_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct FeedParams {
    city: String,
    /// Comma-separated interest keywords, e.g. `castle,restaurant,nightlife`.
    interests: String,
    /// Pass `false` for stable, relevance-ordered output (search callers).
    #[serde(default)]
    shuffle: Option<bool>,
}

pub(super) async fn get_user_feed(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<FeedParams>,
) -> Result<Json<ApiResponse<Feed>>, ApiError> {
    let interests = split_csv(&params.interests);
    if interests.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "interests must be a non-empty comma-separated list",
        ));
    }

    let Some(city) = state.cities.find(&params.city) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("unknown city: {}", params.city),
        ));
    };

    let randomize = params.shuffle.unwrap_or(true);
    let feed = state
        .aggregator
        .build_feed(&city.name, city.location(), &interests, randomize)
        .await
        .map_err(|e| map_places_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: feed,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Splits a comma-separated parameter into trimmed, non-empty entries.
pub(super) fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
