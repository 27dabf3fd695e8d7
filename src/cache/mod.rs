pub mod memory;

pub use memory::MemoryPredictionCache;

use crate::models::Prediction;
use async_trait::async_trait;
use serde::Serialize;

/// Storage for geocoder results keyed by normalised query.
#[async_trait]
pub trait PredictionCache: Send + Sync {
    async fn get_predictions(&self, query: &str) -> Option<Vec<Prediction>>;
    async fn cache_predictions(&self, query: &str, predictions: &[Prediction]);
    async fn get_stats(&self) -> CacheStats;
    fn backend_name(&self) -> &'static str;
}

/// Queries that differ only in case or surrounding whitespace share an entry.
pub fn query_cache_key(query: &str) -> String {
    format!("autocomplete:{}", query.trim().to_lowercase())
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: u64,
}

impl CacheStats {
    /// `hit_rate` is a percentage, 0 before any lookup.
    pub fn from_counts(hits: u64, misses: u64, entries: u64) -> Self {
        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 * 100.0 / lookups as f64
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_is_zero_before_lookups() {
        assert_eq!(CacheStats::from_counts(0, 0, 0).hit_rate, 0.0);
        assert_eq!(CacheStats::from_counts(3, 1, 2).hit_rate, 75.0);
    }

    #[test]
    fn test_query_cache_key_normalises() {
        assert_eq!(query_cache_key("  MG Road "), query_cache_key("mg road"));
        assert_ne!(query_cache_key("mg road"), query_cache_key("mg roads"));
    }
}
