// Display layer for quotes. Rounding to cents happens here and nowhere else.
use itertools::Itertools;

use crate::engine::types::ExecutionQuote;

pub const TITLE: &str = "Order Book Aggregator";

// Quote assets printed with a leading symbol; anything else gets a code suffix
fn currency_symbol(quote_asset: &str) -> Option<&'static str> {
    match quote_asset.to_ascii_uppercase().as_str() {
        "USD" | "USDC" | "USDT" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// `1234567.891` -> `1,234,567.89`
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(String::from_utf8_lossy)
        .join(",");

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// `(1234.5, "USD")` -> `$1,234.50`, `(1234.5, "ETH")` -> `1,234.50 ETH`
pub fn format_notional(value: f64, quote_asset: &str) -> String {
    let amount = group_thousands(value);
    match currency_symbol(quote_asset) {
        Some(symbol) => match amount.strip_prefix('-') {
            Some(abs) => format!("-{symbol}{abs}"),
            None => format!("{symbol}{amount}"),
        },
        None => format!("{amount} {quote_asset}"),
    }
}

pub fn render(quote: &ExecutionQuote, base_asset: &str, quote_asset: &str) -> String {
    [
        TITLE.to_string(),
        format!("To buy {} {}: {}", quote.qty, base_asset, format_notional(quote.buy_cost(), quote_asset)),
        format!("To sell {} {}: {}", quote.qty, base_asset, format_notional(quote.sell_proceeds(), quote_asset)),
    ]
    .join("\n")
}

pub fn render_json(quote: &ExecutionQuote) -> serde_json::Result<String> {
    serde_json::to_string_pretty(quote)
}
