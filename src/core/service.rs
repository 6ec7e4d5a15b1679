//! Forecast orchestration.
//!
//! The fallible fetch-and-compute path lives in `forecast_asset`; the
//! public entry point absorbs every error into a fallback set so callers
//! always receive a well-formed result.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::core::fallback;
use crate::core::forecast::{Horizon, PredictionSet, project_path};
use crate::core::market::HistoryProvider;
use crate::core::volatility::annualized_volatility;

/// Days of history backing every forecast.
pub const LOOKBACK_DAYS: u32 = 30;

const PRIMARY_MODEL_NOTE: &str = "Trend-adjusted volatility model (30d history)";

pub struct PredictionService<P: HistoryProvider> {
    provider: P,
    lookback_days: u32,
}

impl<P: HistoryProvider> PredictionService<P> {
    pub fn new(provider: P) -> Self {
        Self::with_lookback(provider, LOOKBACK_DAYS)
    }

    pub fn with_lookback(provider: P, lookback_days: u32) -> Self {
        Self {
            provider,
            lookback_days,
        }
    }

    /// Generates a forecast for an asset. Never fails: any upstream or
    /// processing error degrades to the static-reference fallback model.
    pub async fn generate_predictions(&self, asset: &str) -> PredictionSet {
        let asset_id = asset.to_lowercase();
        match self.forecast_asset(&asset_id).await {
            Ok(set) => set,
            Err(e) => {
                warn!("Forecast failed for {asset_id}, serving fallback: {e:#}");
                fallback::degraded_set(&asset_id, Utc::now(), &mut rand::thread_rng())
            }
        }
    }

    /// Primary path: one history fetch feeds all four horizons.
    async fn forecast_asset(&self, asset_id: &str) -> Result<PredictionSet> {
        let series = self
            .provider
            .fetch_history(asset_id, self.lookback_days)
            .await
            .with_context(|| format!("Failed to fetch history for {asset_id}"))?;
        if series.is_empty() {
            bail!("Empty price history for {asset_id}");
        }

        let current_price = series
            .last()
            .context("Empty price history")?
            .price;
        let volatility = annualized_volatility(&series);
        debug!(
            "Forecasting {asset_id}: {} points, volatility {volatility:.2}%",
            series.len()
        );

        let now = Utc::now();
        let mut rng = rand::thread_rng();
        let mut predictions = HashMap::new();
        let mut model_info = HashMap::new();
        for horizon in Horizon::ALL {
            predictions.insert(horizon, project_path(&series, horizon, now, &mut rng));
            model_info.insert(horizon, PRIMARY_MODEL_NOTE.to_string());
        }

        Ok(PredictionSet {
            asset: asset_id.to_string(),
            current_price,
            last_updated: now,
            predictions,
            volatility: format!("{volatility:.2}%"),
            model_info,
        })
    }
}
