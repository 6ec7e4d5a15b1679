use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::market::{HistoryProvider, PricePoint};

// CoinGeckoProvider implementation for HistoryProvider
pub struct CoinGeckoProvider {
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Self {
        CoinGeckoProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct MarketChartResponse {
    // Each entry is a [timestampMillis, price] pair
    prices: Vec<(i64, f64)>,
}

#[async_trait]
impl HistoryProvider for CoinGeckoProvider {
    #[instrument(
        name = "CoinGeckoHistoryFetch",
        skip(self),
        fields(asset_id = %asset_id)
    )]
    async fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, asset_id, days
        );
        debug!("Requesting market history from {}", url);

        let client = reqwest::Client::builder().user_agent("coincast/0.1").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for asset: {} URL: {}", e, asset_id, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for asset: {}",
                response.status(),
                asset_id
            ));
        }

        let text = response.text().await?;
        let data: MarketChartResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse market chart for {}: {}", asset_id, e))?;

        let series: Vec<PricePoint> = data
            .prices
            .into_iter()
            .filter_map(|(millis, price)| {
                Utc.timestamp_millis_opt(millis)
                    .single()
                    .map(|timestamp| PricePoint { timestamp, price })
            })
            .collect();

        if series.is_empty() {
            return Err(anyhow!("No price data found for asset: {}", asset_id));
        }
        Ok(series)
    }
}
