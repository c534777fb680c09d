use std::path::PathBuf;

use aggbook_rs::market_data::aggregator::Aggregator;
use aggbook_rs::report;
use aggbook_rs::telemetry;
use aggbook_rs::Settings;
use clap::Parser;

/// Estimate what it costs to buy, and what selling yields, for a quantity of
/// BTC across the merged Coinbase + Gemini order book.
#[derive(Debug, Parser)]
#[command(name = "aggbook", version, about)]
struct Cli {
    /// Quantity of the base asset to buy/sell (defaults to `default_qty` from settings)
    #[arg(long, value_parser = parse_qty)]
    qty: Option<f64>,

    /// Settings file; falls back to optional config/default.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full quote as JSON instead of the two dollar figures
    #[arg(long)]
    json: bool,
}

fn parse_qty(s: &str) -> Result<f64, String> {
    let qty: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    validate_qty(qty)
}

fn validate_qty(qty: f64) -> Result<f64, String> {
    if !qty.is_finite() || qty <= 0.0 {
        return Err(format!("quantity must be a positive number, got `{qty}`"));
    }
    Ok(qty)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    telemetry::init_tracing(&settings.log_filter);
    telemetry::init_metrics(&settings.metrics_addr)?;

    let qty = match cli.qty {
        Some(qty) => qty,
        None => validate_qty(settings.default_qty).map_err(anyhow::Error::msg)?,
    };

    let aggregator = Aggregator::from_settings(&settings)?;
    tracing::info!(venues = ?aggregator.venues(), qty, "Fetching venue books");
    let quote = aggregator.quote(qty).await;

    if cli.json {
        println!("{}", report::render_json(&quote)?);
    } else {
        println!("{}", report::render(&quote, &settings.base_asset, &settings.quote_asset));
    }

    Ok(())
}
