//! Market data abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observation in a historical price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Source of historical price series for an asset.
///
/// One attempt per call; retry and backoff are the caller's problem.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>>;
}
