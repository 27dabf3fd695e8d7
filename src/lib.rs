// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::{MemoryPredictionCache, PredictionCache};
use config::{AutocompleteConfig, Config, MapConfig};
use models::SearchField;
use services::autocomplete::AutocompleteSearch;
use services::geocoder::{CachedGeocoder, GeocodingProvider, LocationIqClient};
use services::map_view::MapProjector;
use std::sync::Arc;
use store::SelectionStore;

// App state for sharing across the application
pub struct AppState {
    pub store: Arc<SelectionStore>,
    pub projector: MapProjector,
    pub origin_search: AutocompleteSearch,
    pub destination_search: AutocompleteSearch,
    pub geocoder_cache: Option<Arc<dyn PredictionCache>>,
}

impl AppState {
    /// Production wiring: LocationIQ behind an in-memory response cache.
    pub fn from_config(config: &Config) -> Self {
        let cache: Arc<dyn PredictionCache> = Arc::new(MemoryPredictionCache::new(
            config.geocoder.cache_ttl_seconds,
            config.geocoder.cache_max_entries,
        ));
        let geocoder = CachedGeocoder::new(
            Arc::new(LocationIqClient::new(config.geocoder.clone())),
            cache.clone(),
        );

        let mut state = Self::with_provider(Arc::new(geocoder), &config.autocomplete, &config.map);
        state.geocoder_cache = Some(cache);
        state
    }

    pub fn with_provider(
        provider: Arc<dyn GeocodingProvider>,
        autocomplete: &AutocompleteConfig,
        map: &MapConfig,
    ) -> Self {
        AppState {
            store: Arc::new(SelectionStore::new()),
            projector: MapProjector::new(map),
            origin_search: AutocompleteSearch::new(provider.clone(), autocomplete),
            destination_search: AutocompleteSearch::new(provider, autocomplete),
            geocoder_cache: None,
        }
    }

    pub fn search(&self, field: SearchField) -> &AutocompleteSearch {
        match field {
            SearchField::Origin => &self.origin_search,
            SearchField::Destination => &self.destination_search,
        }
    }
}
