//! Degraded-mode forecasts from static reference prices.
//!
//! Used when historical data cannot be fetched or processed. Output is
//! structurally identical to the primary model so consumers only notice
//! the switch through `model_info`.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;

use crate::core::forecast::{Horizon, PredictionPoint, PredictionSet, round4};

/// Snapshot of known asset prices, used when the upstream source is down.
const REFERENCE_PRICES: &[(&str, f64)] = &[
    ("bitcoin", 85362.0),
    ("ethereum", 3291.48),
    ("tether", 1.0),
    ("ripple", 2.21),
    ("cardano", 0.7124),
    ("solana", 136.42),
    ("polkadot", 4.05),
    ("dogecoin", 0.2018),
];

const DEFAULT_REFERENCE_PRICE: f64 = 10_000.0;
const FALLBACK_SPREAD: f64 = 0.02;
const FALLBACK_CONFIDENCE: f64 = 0.6;
const FALLBACK_VOLATILITY: &str = "3.00%";

pub const FALLBACK_MODEL_NOTE: &str = "Fallback Model (limited data)";

/// Reference price for an asset, or [`DEFAULT_REFERENCE_PRICE`] for
/// assets outside the catalog.
pub fn reference_price(asset_id: &str) -> f64 {
    REFERENCE_PRICES
        .iter()
        .find(|(id, _)| *id == asset_id)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_REFERENCE_PRICE)
}

/// Builds a complete fallback [`PredictionSet`] for an asset.
///
/// Every point, anchor included, is the reference price jittered within
/// +/-2%, matching the original heuristic. Confidence is a flat 0.6.
pub fn degraded_set<R: Rng>(asset_id: &str, now: DateTime<Utc>, rng: &mut R) -> PredictionSet {
    let reference = reference_price(asset_id);

    let mut predictions = HashMap::new();
    let mut model_info = HashMap::new();
    for horizon in Horizon::ALL {
        let mut points = Vec::with_capacity(horizon.steps() + 1);
        for i in 0..=horizon.steps() {
            let jitter = rng.gen_range(-FALLBACK_SPREAD..=FALLBACK_SPREAD);
            points.push(PredictionPoint {
                date: horizon.point_date(now, i),
                price: round4(reference * (1.0 + jitter)),
                confidence: FALLBACK_CONFIDENCE,
            });
        }
        predictions.insert(horizon, points);
        model_info.insert(horizon, FALLBACK_MODEL_NOTE.to_string());
    }

    PredictionSet {
        asset: asset_id.to_string(),
        current_price: reference,
        last_updated: now,
        predictions,
        volatility: FALLBACK_VOLATILITY.to_string(),
        model_info,
    }
}
