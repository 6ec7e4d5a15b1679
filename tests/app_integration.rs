use std::fs;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(asset_id: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/coins/{asset_id}/market_chart");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .and(query_param("vs_currency", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_failing_mock_server() -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn market_chart_body(prices: &[f64]) -> String {
        let start_ms: i64 = 1_713_744_000_000;
        let pairs: Vec<String> = prices
            .iter()
            .enumerate()
            .map(|(i, p)| format!("[{}, {}]", start_ms + i as i64 * 86_400_000, p))
            .collect();
        format!(
            r#"{{"prices": [{}], "market_caps": [], "total_volumes": []}}"#,
            pairs.join(", ")
        )
    }
}

fn write_config(mock_uri: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
watchlist:
  - bitcoin
providers:
  coingecko:
    base_url: {mock_uri}
lookback_days: 30
"#
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    config_file
}

#[test_log::test(tokio::test)]
async fn test_full_predict_flow_with_mock() {
    let body = test_utils::market_chart_body(&[
        64000.0, 64800.0, 64210.5, 65600.0, 65110.0, 66750.25, 66200.0, 67000.0,
    ]);
    let mock_server = test_utils::create_mock_server("bitcoin", &body).await;
    let config_file = write_config(&mock_server.uri());

    let result = coincast::run_command(
        coincast::AppCommand::Predict {
            assets: vec!["bitcoin".to_string()],
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Predict command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_predict_uses_watchlist_when_no_assets_given() {
    let body = test_utils::market_chart_body(&[1800.0, 1820.0, 1795.5, 1840.0]);
    let mock_server = test_utils::create_mock_server("bitcoin", &body).await;
    let config_file = write_config(&mock_server.uri());

    let result = coincast::run_command(
        coincast::AppCommand::Predict {
            assets: vec![],
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Watchlist predict failed: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_predict_succeeds_when_upstream_is_down() {
    // The fallback model absorbs the upstream failure; the command must
    // still complete and render a structurally complete forecast.
    let mock_server = test_utils::create_failing_mock_server().await;
    let config_file = write_config(&mock_server.uri());

    info!("Running predict against a failing upstream");
    let result = coincast::run_command(
        coincast::AppCommand::Predict {
            assets: vec!["bitcoin".to_string(), "not_a_real_coin".to_string()],
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Fallback predict failed: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_predict_fails_without_assets_or_watchlist() {
    let mock_server = test_utils::create_failing_mock_server().await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
providers:
  coingecko:
    base_url: {}
"#,
        mock_server.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = coincast::run_command(
        coincast::AppCommand::Predict {
            assets: vec![],
            json: false,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("No assets to forecast")
    );
}

#[test_log::test(tokio::test)]
async fn test_service_level_fallback_fields() {
    use coincast::core::Horizon;
    use coincast::core::service::PredictionService;
    use coincast::providers::caching::CachedHistoryProvider;
    use coincast::providers::coingecko::CoinGeckoProvider;

    let mock_server = test_utils::create_failing_mock_server().await;
    let provider = CachedHistoryProvider::new(CoinGeckoProvider::new(&mock_server.uri()));
    let service = PredictionService::new(provider);

    let set = service.generate_predictions("bitcoin").await;
    assert_eq!(set.current_price, 85362.0);
    assert_eq!(
        set.model_info[&Horizon::OneDay],
        "Fallback Model (limited data)"
    );
    assert_eq!(set.predictions[&Horizon::OneHour].len(), 5);
    assert_eq!(set.predictions[&Horizon::OneDay].len(), 25);
    assert_eq!(set.predictions[&Horizon::OneWeek].len(), 8);
    assert_eq!(set.predictions[&Horizon::OneMonth].len(), 31);
}

#[test_log::test(tokio::test)]
async fn test_cached_provider_hits_upstream_once() {
    use coincast::core::market::HistoryProvider;
    use coincast::providers::caching::CachedHistoryProvider;
    use coincast::providers::coingecko::CoinGeckoProvider;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let body = test_utils::market_chart_body(&[100.0, 101.0, 102.0]);
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/cardano/market_chart"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = CachedHistoryProvider::new(CoinGeckoProvider::new(&mock_server.uri()));
    let first = provider.fetch_history("cardano", 30).await.unwrap();
    let second = provider.fetch_history("cardano", 30).await.unwrap();
    assert_eq!(first, second);
    // MockServer verifies the expect(1) on drop
}
