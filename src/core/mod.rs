//! Core forecast logic and domain types

pub mod cache;
pub mod config;
pub mod fallback;
pub mod forecast;
pub mod log;
pub mod market;
pub mod service;
pub mod volatility;

// Re-export main types for cleaner imports
pub use forecast::{Horizon, PredictionPoint, PredictionSet};
pub use market::{HistoryProvider, PricePoint};
pub use service::PredictionService;
