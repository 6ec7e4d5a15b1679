pub mod caching;
pub mod coingecko;

// Re-export the cache for providers that compose it directly
pub use crate::core::cache::Cache;
