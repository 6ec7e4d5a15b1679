pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Predict { assets: Vec<String>, json: bool },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Coincast starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .providers
        .coingecko
        .as_ref()
        .map_or(config::DEFAULT_COINGECKO_URL, |p| p.base_url.as_str());
    let history_provider = providers::caching::CachedHistoryProvider::new(
        providers::coingecko::CoinGeckoProvider::new(base_url),
    );
    let service =
        core::service::PredictionService::with_lookback(history_provider, config.lookback_days);

    match command {
        AppCommand::Predict { assets, json } => {
            cli::predict::run(&service, &assets, &config.watchlist, json).await
        }
    }
}
