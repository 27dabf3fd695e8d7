use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ridemap::cache::MemoryPredictionCache;
use ridemap::config::GeocoderConfig;
use ridemap::services::geocoder::{CachedGeocoder, GeocodingProvider, LocationIqClient};
use ridemap::AppError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

mod common;

type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Stand-in for the LocationIQ autocomplete endpoint.
async fn fake_autocomplete(
    State(seen): State<SeenQueries>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let q = params.get("q").cloned().unwrap_or_default();
    seen.lock().unwrap().push(params);

    match q.as_str() {
        "nomatch" => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Unable to geocode"})),
        )
            .into_response(),
        "limited" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "Rate Limited Second"})),
        )
            .into_response(),
        "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
        "odd shape" => Json(json!({"results": []})).into_response(),
        _ => Json(json!([{
            "place_id": "331866",
            "display_name": format!("{}, Bengaluru, Karnataka, India", q),
            "display_place": q,
            "display_address": "Bengaluru, Karnataka, India",
            "lat": "12.9352",
            "lon": "77.6245",
            "address": {"name": q, "city": "Bengaluru", "country": "India"}
        }]))
        .into_response(),
    }
}

async fn start_fake_provider() -> (String, SeenQueries) {
    let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/autocomplete", get(fake_autocomplete))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}/v1/autocomplete", port), seen)
}

fn client_for(base_url: String) -> LocationIqClient {
    let mut config = GeocoderConfig::new("pk.test");
    config.base_url = base_url;
    LocationIqClient::new(config)
}

#[tokio::test]
async fn test_sends_expected_query_parameters() {
    let (base_url, seen) = start_fake_provider().await;
    let client = client_for(base_url);

    client.autocomplete("Koramangala 5th Block").await.unwrap();

    let seen = seen.lock().unwrap();
    let params = &seen[0];
    assert_eq!(params["key"], "pk.test");
    assert_eq!(params["q"], "Koramangala 5th Block");
    assert_eq!(params["limit"], "10");
    assert_eq!(params["dedupe"], "1");
    assert_eq!(params["countrycodes"], "in");
}

#[tokio::test]
async fn test_array_response_becomes_predictions() {
    let (base_url, _) = start_fake_provider().await;
    let client = client_for(base_url);

    let predictions = client.autocomplete("Koramangala").await.unwrap();

    assert_eq!(predictions.len(), 1);
    let p = &predictions[0];
    assert_eq!(p.display_place, "Koramangala");
    assert_eq!(p.primary_label(), "Koramangala");
    let coordinate = p.coordinate().unwrap();
    assert_eq!(coordinate.latitude, 12.9352);
    assert_eq!(coordinate.longitude, 77.6245);
}

#[tokio::test]
async fn test_no_match_error_object_is_empty_not_failure() {
    let (base_url, _) = start_fake_provider().await;
    let client = client_for(base_url);

    let predictions = client.autocomplete("nomatch").await.unwrap();
    assert!(predictions.is_empty());
}

#[tokio::test]
async fn test_unexpected_json_shape_is_empty() {
    let (base_url, _) = start_fake_provider().await;
    let client = client_for(base_url);

    assert!(client.autocomplete("odd shape").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let (base_url, _) = start_fake_provider().await;
    let client = client_for(base_url);

    let result = client.autocomplete("garbage").await;
    assert!(matches!(result, Err(AppError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = client_for(format!("http://127.0.0.1:{}/v1/autocomplete", port));
    let result = client.autocomplete("Koramangala").await;
    assert!(matches!(result, Err(AppError::Network(_))));
}

#[tokio::test]
async fn test_rate_limit_is_a_failure() {
    let (base_url, _) = start_fake_provider().await;
    let client = client_for(base_url);

    let result = client.autocomplete("limited").await;
    assert!(matches!(result, Err(AppError::Network(_))));
}

/// Rate limits the first call, then answers normally.
async fn limited_once(State(limited): State<Arc<AtomicBool>>) -> Response {
    if limited.swap(false, Ordering::SeqCst) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "Rate Limited Second"})),
        )
            .into_response();
    }
    Json(json!([{
        "place_id": "1",
        "display_name": "Indiranagar, Bengaluru, Karnataka, India",
        "display_place": "Indiranagar",
        "display_address": "Bengaluru, Karnataka, India",
        "lat": "12.9784",
        "lon": "77.6408"
    }]))
    .into_response()
}

#[tokio::test]
async fn test_rate_limited_response_is_not_cached() {
    let app = Router::new()
        .route("/v1/autocomplete", get(limited_once))
        .with_state(Arc::new(AtomicBool::new(true)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let geocoder = CachedGeocoder::new(
        Arc::new(client_for(format!("http://127.0.0.1:{}/v1/autocomplete", port))),
        Arc::new(MemoryPredictionCache::new(600, 100)),
    );

    assert!(geocoder.autocomplete("Indiranagar").await.is_err());

    let predictions = geocoder.autocomplete("Indiranagar").await.unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].display_place, "Indiranagar");
}

#[tokio::test]
async fn test_locationiq_live_autocomplete() {
    if common::should_skip_real_api_tests() {
        println!("Skipping real API test");
        return;
    }

    let api_key = std::env::var("LOCATIONIQ_API_KEY").expect("LOCATIONIQ_API_KEY must be set");
    let client = LocationIqClient::new(GeocoderConfig::new(api_key));

    let result = client.autocomplete("Cubbon Park").await;
    assert!(result.is_ok(), "LocationIQ call should succeed");

    for prediction in result.unwrap() {
        let coordinate = prediction.coordinate().expect("provider coordinates parse");
        // Country filter is India
        assert!(coordinate.latitude > 5.0 && coordinate.latitude < 38.0);
        assert!(coordinate.longitude > 67.0 && coordinate.longitude < 98.0);
    }
}
