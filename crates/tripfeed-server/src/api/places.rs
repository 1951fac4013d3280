use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use tripfeed_places::{DetailMode, PlaceDetail};

use crate::middleware::RequestId;

use super::{map_places_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PlaceDetailParams {
    /// Field-inclusion mode: `full` (default), `ai`, or `saved`.
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

pub(super) async fn get_place_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(place_id): Path<String>,
    Query(params): Query<PlaceDetailParams>,
) -> Result<Json<ApiResponse<PlaceDetail>>, ApiError> {
    let mode = match params.mode.as_deref() {
        None => DetailMode::Full,
        Some(raw) => raw
            .parse::<DetailMode>()
            .map_err(|reason| ApiError::new(req_id.0.clone(), "validation_error", reason))?,
    };

    let detail = state
        .aggregator
        .fetch_place_detail(
            &place_id,
            params.tag.as_deref(),
            params.city.as_deref(),
            mode,
        )
        .await
        .map_err(|e| map_places_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: detail,
        meta: ResponseMeta::new(req_id.0),
    }))
}
