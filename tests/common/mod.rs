use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ridemap::config::{AutocompleteConfig, MapConfig};
use ridemap::models::{Driver, Prediction};
use ridemap::services::geocoder::GeocodingProvider;
use ridemap::{AppError, AppState};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Geocoder double that answers every query with one prediction named after
/// it, except "offline" which fails.
#[derive(Default)]
#[allow(dead_code)]
pub struct StaticProvider {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl GeocodingProvider for StaticProvider {
    async fn autocomplete(&self, query: &str) -> ridemap::Result<Vec<Prediction>> {
        self.calls.lock().unwrap().push(query.to_string());
        if query == "offline" {
            return Err(AppError::Network("connection refused".to_string()));
        }
        Ok(vec![create_test_prediction(query, "12.9784", "77.6408")])
    }
}

/// Create a test prediction
#[allow(dead_code)]
pub fn create_test_prediction(place: &str, lat: &str, lon: &str) -> Prediction {
    Prediction {
        place_id: format!("place-{}", place),
        display_name: format!("{}, Bengaluru, Karnataka, India", place),
        display_place: place.to_string(),
        display_address: "Bengaluru, Karnataka, India".to_string(),
        lat: lat.to_string(),
        lon: lon.to_string(),
        address: None,
    }
}

/// The roster the client ships with before a driver feed exists
#[allow(dead_code)]
pub fn test_drivers() -> Vec<Driver> {
    [
        (1, "James", "Wilson", 4, 4.8),
        (2, "David", "Brown", 5, 4.6),
        (3, "Michael", "Johnson", 4, 4.7),
        (4, "Robert", "Green", 4, 4.9),
    ]
    .into_iter()
    .map(|(id, first, last, seats, rating)| Driver {
        driver_id: id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        profile_image_url: format!("https://example.com/drivers/{}.png", id),
        car_image_url: format!("https://example.com/cars/{}.png", id),
        car_seats: seats,
        rating,
    })
    .collect()
}

/// App state with a [`StaticProvider`] and default settings
#[allow(dead_code)]
pub fn setup_test_state(provider: Arc<StaticProvider>) -> Arc<AppState> {
    Arc::new(AppState::with_provider(
        provider,
        &AutocompleteConfig::default(),
        &MapConfig::default(),
    ))
}

/// Send one request through the router and decode the JSON body
#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok() || std::env::var("LOCATIONIQ_API_KEY").is_err()
}
