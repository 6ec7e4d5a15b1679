use super::ui;
use crate::core::forecast::{Horizon, PredictionSet};
use crate::core::market::HistoryProvider;
use crate::core::service::PredictionService;
use anyhow::{Result, bail};
use comfy_table::Cell;
use futures::future::join_all;

impl PredictionSet {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Horizon"),
            ui::header_cell("End Price (USD)"),
            ui::header_cell("Move"),
            ui::header_cell("Range (USD)"),
            ui::header_cell("Avg Confidence"),
            ui::header_cell("Model"),
        ]);

        for horizon in Horizon::ALL {
            let Some(points) = self.predictions.get(&horizon) else {
                continue;
            };
            let Some(end) = points.last() else {
                continue;
            };

            let low = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
            let high = points
                .iter()
                .map(|p| p.price)
                .fold(f64::NEG_INFINITY, f64::max);
            let avg_confidence =
                points.iter().map(|p| p.confidence).sum::<f64>() / points.len() as f64;
            let move_pct = if self.current_price > 0.0 {
                (end.price - self.current_price) / self.current_price * 100.0
            } else {
                0.0
            };

            let model = self
                .model_info
                .get(&horizon)
                .map(String::as_str)
                .unwrap_or("N/A");

            table.add_row(vec![
                Cell::new(horizon.to_string()),
                ui::numeric_cell(&format!("{:.4}", end.price)),
                ui::move_cell(move_pct, &format!("{move_pct:+.2}%")),
                ui::numeric_cell(&format!("{low:.4} – {high:.4}")),
                ui::numeric_cell(&format!("{:.0}%", avg_confidence * 100.0)),
                Cell::new(model),
            ]);
        }

        let mut output = format!(
            "Asset: {}\n\n",
            ui::style_text(&self.asset, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nCurrent Price (USD): {}  Volatility: {}  Updated: {}",
            ui::style_text(&format!("{:.4}", self.current_price), ui::StyleType::Value),
            ui::style_text(&self.volatility, ui::StyleType::Label),
            ui::style_text(
                &self.last_updated.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                ui::StyleType::Subtle
            ),
        ));

        output
    }
}

/// Generates and renders forecasts for the requested assets, falling back
/// to the configured watchlist when none are given.
pub async fn run<P: HistoryProvider>(
    service: &PredictionService<P>,
    assets: &[String],
    watchlist: &[String],
    json: bool,
) -> Result<()> {
    let targets: Vec<String> = if assets.is_empty() {
        watchlist.to_vec()
    } else {
        assets.to_vec()
    };
    if targets.is_empty() {
        bail!("No assets to forecast; pass them as arguments or add a watchlist to the config");
    }

    let pb = ui::new_progress_bar(targets.len() as u64, true);
    pb.set_message("Generating forecasts...");

    let forecast_futures = targets.iter().map(|asset| {
        let pb_clone = pb.clone();
        async move {
            let set = service.generate_predictions(asset).await;
            pb_clone.inc(1);
            set
        }
    });
    let sets: Vec<PredictionSet> = join_all(forecast_futures).await;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    }

    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            ui::print_separator();
        }
        println!("{}", set.display_as_table());
    }
    Ok(())
}
