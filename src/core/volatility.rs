//! Annualized volatility from a historical price series.

use crate::core::market::PricePoint;

/// Returned when a series is too short to compute returns from.
pub const DEFAULT_VOLATILITY_PCT: f64 = 2.0;

const TRADING_DAYS_PER_YEAR: f64 = 365.0;

/// Annualized volatility of a price series, as a percentage.
///
/// Simple daily returns, population standard deviation (divide by n,
/// not n-1), annualized by sqrt(365). Series with fewer than two points
/// fall back to [`DEFAULT_VOLATILITY_PCT`].
pub fn annualized_volatility(series: &[PricePoint]) -> f64 {
    if series.len() < 2 {
        return DEFAULT_VOLATILITY_PCT;
    }

    let returns: Vec<f64> = series
        .windows(2)
        .map(|pair| (pair[1].price - pair[0].price) / pair[0].price)
        .collect();

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;

    variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt() * 100.0
}
