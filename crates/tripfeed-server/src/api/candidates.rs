use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use tripfeed_places::PlaceDetail;

use crate::middleware::RequestId;

use super::feed::split_csv;
use super::{
    map_places_error, normalize_candidate_limit, ApiError, ApiResponse, AppState, ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct CandidateParams {
    city: String,
    /// Comma-separated search phrases extracted from a chat message.
    keywords: String,
    /// Optional override of the candidate cap.
    #[serde(default)]
    max: Option<usize>,
}

/// The AI-guide's place-stitching step: a capped, enriched candidate set for
/// one chat turn. Output order is completion order.
pub(super) async fn get_candidate_set(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<CandidateParams>,
) -> Result<Json<ApiResponse<Vec<PlaceDetail>>>, ApiError> {
    let keywords = split_csv(&params.keywords);
    if keywords.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "keywords must be a non-empty comma-separated list",
        ));
    }

    let Some(city) = state.cities.find(&params.city) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("unknown city: {}", params.city),
        ));
    };

    let max_candidates =
        normalize_candidate_limit(params.max, state.aggregator.policy().max_ai_candidates);

    let candidates = state
        .aggregator
        .build_ai_candidate_set(&city.name, city.location(), &keywords, max_candidates)
        .await
        .map_err(|e| map_places_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: candidates,
        meta: ResponseMeta::new(req_id.0),
    }))
}
