//! Integration tests for `GooglePlacesClient` using wiremock HTTP mocks.

use tripfeed_core::GeoPoint;
use tripfeed_places::{GooglePlacesClient, PlaceProvider, PlacesError, Rating};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GooglePlacesClient {
    GooglePlacesClient::with_base_url("test-key", 30, 0, 0, base_url)
        .expect("client construction should not fail")
}

fn pogradec() -> GeoPoint {
    GeoPoint {
        latitude: 40.9025,
        longitude: 20.6525,
    }
}

#[tokio::test]
async fn nearby_search_returns_parsed_records() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "place_id": "p1",
                "name": "Berat Castle",
                "rating": 4.6,
                "photos": [{ "photo_reference": "ph-1" }]
            },
            {
                "place_id": "p2",
                "name": "Osumi Canyon",
                "photos": []
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("key", "test-key"))
        .and(query_param("location", "40.9025,20.6525"))
        .and(query_param("radius", "5000"))
        .and(query_param("keyword", "castle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .nearby_search(pogradec(), 5_000, "castle")
        .await
        .expect("should parse search results");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].place_id, "p1");
    assert_eq!(records[0].name, "Berat Castle");
    assert_eq!(Rating::from_raw(records[0].rating.as_ref()), Rating::Rated(4.6));
    assert_eq!(records[0].photos.len(), 1);
    assert!(records[1].photos.is_empty());
    assert!(records[1].rating.is_none());
}

#[tokio::test]
async fn nearby_search_skips_malformed_records() {
    let server = MockServer::start().await;

    // The second record has no place_id; only that record is dropped.
    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "place_id": "p1",
                "name": "Berat Castle",
                "photos": [{ "photo_reference": "ph-1" }]
            },
            {
                "name": "Nameless Ruin"
            },
            {
                "place_id": "p3",
                "name": "Mangalem Quarter",
                "photos": [{ "photo_reference": "ph-3" }]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .nearby_search(pogradec(), 5_000, "castle")
        .await
        .expect("malformed records must not fail the batch");

    let ids: Vec<&str> = records.iter().map(|r| r.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
}

#[tokio::test]
async fn nearby_search_zero_results_is_empty_ok() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ZERO_RESULTS",
        "results": []
    });

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .nearby_search(pogradec(), 5_000, "submarine base")
        .await
        .expect("ZERO_RESULTS is not an error");

    assert!(records.is_empty());
}

#[tokio::test]
async fn request_denied_maps_to_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid."
    });

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.nearby_search(pogradec(), 5_000, "castle").await;

    let err = result.expect_err("REQUEST_DENIED should be an error");
    assert!(
        matches!(err, PlacesError::Api { ref status, .. } if status == "REQUEST_DENIED"),
        "unexpected error: {err}"
    );
    assert!(err.to_string().contains("API key is invalid"));
}

#[tokio::test]
async fn over_query_limit_maps_to_quota_exceeded() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OVER_QUERY_LIMIT",
        "error_message": "You have exceeded your daily request quota."
    });

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.place_details("p1").await;

    assert!(matches!(result, Err(PlacesError::QuotaExceeded(_))));
}

#[tokio::test]
async fn place_details_returns_parsed_payload() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "result": {
            "place_id": "p1",
            "name": "Berat Castle",
            "formatted_address": "Lagjja Kala, Berat 5001",
            "rating": 4.6,
            "formatted_phone_number": "069 123 4567",
            "photos": [
                { "photo_reference": "ph-1" },
                { "photo_reference": "ph-2" }
            ],
            "opening_hours": {
                "weekday_text": ["Monday: Open 24 hours"]
            },
            "reviews": [
                {
                    "author_name": "Ana",
                    "rating": 5,
                    "text": "Stunning views over the Osum valley.",
                    "relative_time_description": "a month ago"
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("key", "test-key"))
        .and(query_param("place_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.place_details("p1").await.expect("should parse detail");

    assert_eq!(detail.name.as_deref(), Some("Berat Castle"));
    assert_eq!(
        detail.formatted_address.as_deref(),
        Some("Lagjja Kala, Berat 5001")
    );
    assert_eq!(detail.photos.len(), 2);
    assert_eq!(detail.reviews.len(), 1);
    assert_eq!(detail.reviews[0].author_name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn place_details_with_missing_result_is_empty_payload() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "OK" });

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client
        .place_details("ghost")
        .await
        .expect("missing result body should parse as empty payload");

    assert!(detail.name.is_none());
    assert!(detail.photos.is_empty());
}

#[tokio::test]
async fn http_500_maps_to_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.nearby_search(pogradec(), 5_000, "castle").await;

    assert!(matches!(result, Err(PlacesError::Http(_))));
}

#[tokio::test]
async fn invalid_json_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.nearby_search(pogradec(), 5_000, "castle").await;

    assert!(matches!(result, Err(PlacesError::Deserialize { .. })));
}
