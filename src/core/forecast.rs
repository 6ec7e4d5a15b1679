//! Forward price path generation.
//!
//! A forecast blends a short-window trend with volatility-scaled noise.
//! The noise source is injected so tests can pin a seeded RNG and assert
//! exact outputs.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

use crate::core::market::PricePoint;
use crate::core::volatility::annualized_volatility;

/// One of the four supported forecast windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Horizon {
    #[serde(rename = "1H")]
    OneHour,
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [
        Horizon::OneHour,
        Horizon::OneDay,
        Horizon::OneWeek,
        Horizon::OneMonth,
    ];

    /// Number of future points beyond the anchor.
    pub fn steps(&self) -> usize {
        match self {
            Horizon::OneHour => 4,
            Horizon::OneDay => 24,
            Horizon::OneWeek => 7,
            Horizon::OneMonth => 30,
        }
    }

    /// Spacing between consecutive points, in hours.
    pub fn interval_hours(&self) -> f64 {
        match self {
            Horizon::OneHour => 0.25,
            Horizon::OneDay => 1.0,
            Horizon::OneWeek => 24.0,
            Horizon::OneMonth => 24.0,
        }
    }

    /// Timestamp of the i-th point relative to the generation instant.
    pub fn point_date(&self, now: DateTime<Utc>, step: usize) -> DateTime<Utc> {
        let minutes = (step as f64 * self.interval_hours() * 60.0).round() as i64;
        now + Duration::minutes(minutes)
    }
}

impl Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Horizon::OneHour => "1H",
                Horizon::OneDay => "1D",
                Horizon::OneWeek => "1W",
                Horizon::OneMonth => "1M",
            }
        )
    }
}

/// A single forecast point with a heuristic confidence score in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionPoint {
    pub date: DateTime<Utc>,
    pub price: f64,
    pub confidence: f64,
}

/// Full forecast for one asset across all horizons. Produced fresh on
/// every call; never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSet {
    pub asset: String,
    pub current_price: f64,
    pub last_updated: DateTime<Utc>,
    pub predictions: HashMap<Horizon, Vec<PredictionPoint>>,
    pub volatility: String,
    pub model_info: HashMap<Horizon, String>,
}

const TREND_WEIGHT: f64 = 0.7;
const NOISE_WEIGHT: f64 = 0.3;
const MIN_CONFIDENCE: f64 = 0.5;
const TREND_WINDOW: usize = 5;

/// Round to 4 decimal places.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Mean of the last [`TREND_WINDOW`] prices minus the mean of the window
/// before it, normalized by the current price. Zero when the series is
/// too short to form both windows.
fn recent_trend(prices: &[f64], current_price: f64) -> f64 {
    if prices.len() <= TREND_WINDOW || current_price == 0.0 {
        return 0.0;
    }
    let recent = &prices[prices.len() - TREND_WINDOW..];
    let prior = &prices[prices.len().saturating_sub(2 * TREND_WINDOW)..prices.len() - TREND_WINDOW];

    let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let prior_mean = prior.iter().sum::<f64>() / prior.len() as f64;
    (recent_mean - prior_mean) / current_price
}

/// Projects a forward price path of `steps + 1` points for one horizon.
///
/// The first point is always the anchor: current price at `now` with
/// confidence 1.0. Every later point applies a trend/noise blend to the
/// current price and decays confidence with the size of the move.
pub fn project_path<R: Rng>(
    series: &[PricePoint],
    horizon: Horizon,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<PredictionPoint> {
    let Some(last) = series.last() else {
        return Vec::new();
    };
    let current_price = last.price;
    let volatility_fraction = annualized_volatility(series) / 100.0;

    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
    let trend = recent_trend(&prices, current_price);

    let steps = horizon.steps();
    let mut points = Vec::with_capacity(steps + 1);
    points.push(PredictionPoint {
        date: now,
        price: current_price,
        confidence: 1.0,
    });

    for i in 1..=steps {
        let random_factor = rng.gen_range(-1.0..=1.0) * volatility_fraction;
        let predicted_change = trend * TREND_WEIGHT + random_factor * NOISE_WEIGHT;

        points.push(PredictionPoint {
            date: horizon.point_date(now, i),
            price: round4(current_price * (1.0 + predicted_change)),
            confidence: (1.0 - 2.0 * predicted_change.abs()).clamp(MIN_CONFIDENCE, 1.0),
        });
    }

    points
}
