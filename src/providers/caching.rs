use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::cache::Cache;
use crate::core::market::{HistoryProvider, PricePoint};

// Time-bounded caching for HistoryProvider
//
// A fresh entry short-circuits the fetch. Fetch errors propagate to the
// caller and leave any stale entry untouched; serving degraded data is
// the prediction service's job, not the cache's.
#[derive(Clone)]
pub struct CachedHistoryProvider<T: HistoryProvider> {
    inner: T,
    cache: Cache<String, Vec<PricePoint>>,
}

impl<T: HistoryProvider> CachedHistoryProvider<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            cache: Cache::new(),
        }
    }

    pub fn with_ttl(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::with_ttl(ttl),
        }
    }
}

#[async_trait]
impl<T: HistoryProvider + Send + Sync> HistoryProvider for CachedHistoryProvider<T> {
    async fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let key = format!("{asset_id}-{days}");
        if let Some(series) = self.cache.get(&key).await {
            debug!("Cache hit for history: {}", key);
            return Ok(series);
        }
        debug!("Cache miss for history: {}", key);
        let series = self.inner.fetch_history(asset_id, days).await?;
        self.cache.put(key, series.clone()).await;
        Ok(series)
    }
}
