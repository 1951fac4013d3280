mod candidates;
mod cities;
mod feed;
mod places;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use tripfeed_core::CitiesFile;
use tripfeed_places::{FeedAggregator, GooglePlacesClient, PlacesError};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<FeedAggregator<GooglePlacesClient>>,
    pub cities: Arc<CitiesFile>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" | "upstream_quota" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a provider failure to the wire error envelope.
///
/// Quota exhaustion gets its own code so operators can tell it apart from
/// transient upstream trouble; both surface as 502 to the client.
pub(super) fn map_places_error(request_id: String, error: &PlacesError) -> ApiError {
    tracing::error!(error = %error, "places provider call failed");
    match error {
        PlacesError::QuotaExceeded(_) => ApiError::new(
            request_id,
            "upstream_quota",
            "place provider quota exceeded",
        ),
        _ => ApiError::new(request_id, "upstream_error", "place provider unavailable"),
    }
}

/// Clamps the requested candidate cap to a sane range.
pub(super) fn normalize_candidate_limit(max: Option<usize>, default: usize) -> usize {
    max.unwrap_or(default).clamp(1, 20)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/cities", get(cities::list_cities))
        .route("/api/v1/feed", get(feed::get_user_feed))
        .route("/api/v1/candidates", get(candidates::get_candidate_set))
        .route("/api/v1/places/{place_id}", get(places::get_place_detail))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
