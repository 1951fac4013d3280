use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CityItem {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub(super) async fn list_cities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CityItem>>> {
    let data = state
        .cities
        .cities
        .iter()
        .map(|city| CityItem {
            name: city.name.clone(),
            latitude: city.latitude,
            longitude: city.longitude,
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
