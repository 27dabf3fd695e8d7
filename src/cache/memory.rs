use crate::cache::{query_cache_key, CacheStats, PredictionCache};
use crate::models::Prediction;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Recent geocoder answers, keyed by normalised query text. Entries expire
/// after the configured TTL, and the least useful ones are evicted once
/// `max_queries` distinct queries are held.
pub struct MemoryPredictionCache {
    answers: Cache<String, Arc<Vec<Prediction>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryPredictionCache {
    pub fn new(ttl_seconds: u64, max_queries: u64) -> Self {
        MemoryPredictionCache {
            answers: Cache::builder()
                .time_to_live(Duration::from_secs(ttl_seconds))
                .max_capacity(max_queries)
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl PredictionCache for MemoryPredictionCache {
    async fn get_predictions(&self, query: &str) -> Option<Vec<Prediction>> {
        let answer = self.answers.get(&query_cache_key(query)).await;
        let counter = if answer.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);

        tracing::trace!(query = %query, hit = answer.is_some(), "Prediction cache lookup");
        answer.map(|predictions| predictions.as_ref().clone())
    }

    async fn cache_predictions(&self, query: &str, predictions: &[Prediction]) {
        self.answers
            .insert(query_cache_key(query), Arc::new(predictions.to_vec()))
            .await;
        tracing::debug!(
            query = %query,
            results = predictions.len(),
            "Remembered geocoder answer for '{}'",
            query
        );
    }

    async fn get_stats(&self) -> CacheStats {
        CacheStats::from_counts(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.answers.entry_count(),
        )
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
