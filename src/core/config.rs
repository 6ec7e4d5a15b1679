use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinGeckoProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub coingecko: Option<CoinGeckoProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            coingecko: Some(CoinGeckoProviderConfig {
                base_url: DEFAULT_COINGECKO_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Assets forecast by `predict` when none are given on the command line.
    #[serde(default)]
    pub watchlist: Vec<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_lookback_days() -> u32 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            watchlist: Vec::new(),
            providers: ProvidersConfig::default(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to
    /// built-in defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "coincast", "coincast")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
watchlist:
  - bitcoin
  - ethereum
providers:
  coingecko:
    base_url: "http://example.com/api/v3"
lookback_days: 14
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.watchlist, vec!["bitcoin", "ethereum"]);
        assert_eq!(
            config.providers.coingecko.unwrap().base_url,
            "http://example.com/api/v3"
        );
        assert_eq!(config.lookback_days, 14);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("watchlist: [bitcoin]").unwrap();
        assert_eq!(config.lookback_days, 30);
        assert_eq!(
            config.providers.coingecko.unwrap().base_url,
            DEFAULT_COINGECKO_URL
        );
    }
}
