use crate::cache::PredictionCache;
use crate::config::GeocoderConfig;
use crate::error::{AppError, Result};
use crate::models::Prediction;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Something that turns free text into candidate places.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Shape mismatches and "no match" come back as an empty list. Transport
    /// failures, error statuses and undecodable bodies are errors.
    async fn autocomplete(&self, query: &str) -> Result<Vec<Prediction>>;
}

#[derive(Clone)]
pub struct LocationIqClient {
    client: Client,
    config: GeocoderConfig,
}

impl LocationIqClient {
    pub fn new(config: GeocoderConfig) -> Self {
        LocationIqClient {
            client: Client::new(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl GeocodingProvider for LocationIqClient {
    async fn autocomplete(&self, query: &str) -> Result<Vec<Prediction>> {
        tracing::debug!(
            query = %query,
            limit = self.config.result_limit,
            "Geocoder request: '{}'",
            query
        );

        let limit = self.config.result_limit.to_string();
        let dedupe = if self.config.dedupe { "1" } else { "0" };
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", query),
                ("limit", limit.as_str()),
                ("dedupe", dedupe),
                ("countrycodes", self.config.country_codes.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request failed: {}", e)))?;

        // LocationIQ answers "no match" with a 404 and an error object, which
        // parses to no results. Any other error status is a failure.
        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            tracing::warn!(
                status = %status,
                query = %query,
                "Geocoder HTTP status {} for '{}'",
                status, query
            );
            return Err(AppError::Network(format!("Geocoder returned HTTP {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse response: {}", e)))?;

        let predictions = parse_predictions(body);
        tracing::debug!(
            query = %query,
            results = predictions.len(),
            "Geocoder returned {} predictions for '{}'",
            predictions.len(), query
        );
        Ok(predictions)
    }
}

/// Validate a provider response. Anything other than an array of
/// well-formed predictions yields no results.
pub fn parse_predictions(body: Value) -> Vec<Prediction> {
    if !body.is_array() {
        tracing::debug!("Geocoder response is not an array, treating as no results");
        return Vec::new();
    }

    match serde_json::from_value::<Vec<Prediction>>(body) {
        Ok(predictions) => predictions,
        Err(e) => {
            tracing::warn!("Malformed geocoder response, treating as no results: {}", e);
            Vec::new()
        }
    }
}

/// Serves repeated queries from a [`PredictionCache`]. Failures are not cached.
pub struct CachedGeocoder {
    inner: Arc<dyn GeocodingProvider>,
    cache: Arc<dyn PredictionCache>,
}

impl CachedGeocoder {
    pub fn new(inner: Arc<dyn GeocodingProvider>, cache: Arc<dyn PredictionCache>) -> Self {
        CachedGeocoder { inner, cache }
    }

    pub fn cache(&self) -> &Arc<dyn PredictionCache> {
        &self.cache
    }
}

#[async_trait]
impl GeocodingProvider for CachedGeocoder {
    async fn autocomplete(&self, query: &str) -> Result<Vec<Prediction>> {
        if let Some(predictions) = self.cache.get_predictions(query).await {
            return Ok(predictions);
        }

        let predictions = self.inner.autocomplete(query).await?;
        self.cache.cache_predictions(query, &predictions).await;
        Ok(predictions)
    }
}
