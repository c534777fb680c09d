use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::market_data::adapters::coinbase::COINBASE_REST_URL;
use crate::market_data::adapters::gemini::GEMINI_REST_URL;

pub const ENV_PREFIX: &str = "AGGBOOK";
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_qty")]
    pub default_qty: f64,
    #[serde(default = "default_base_asset")]
    pub base_asset: String,
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_rate_limit_interval_ms")]
    pub rate_limit_interval_ms: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    // only read with the `metrics-exporter` feature
    #[serde(default = "default_metrics_addr")]
    pub metrics_addr: String,
    #[serde(default)]
    pub coinbase: CoinbaseSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoinbaseSettings {
    #[serde(default = "default_coinbase_url")]
    pub base_url: String,
    #[serde(default = "default_coinbase_product")]
    pub product: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_symbol")]
    pub symbol: String,
}

fn default_qty() -> f64 { 10.0 }
fn default_base_asset() -> String { "BTC".to_string() }
fn default_quote_asset() -> String { "USD".to_string() }
fn default_request_timeout_ms() -> u64 { 5_000 }
fn default_rate_limit_interval_ms() -> u64 { 2_000 }
fn default_log_filter() -> String { "info".to_string() }
fn default_user_agent() -> String { concat!("aggbook/", env!("CARGO_PKG_VERSION")).to_string() }
fn default_metrics_addr() -> String { "0.0.0.0:9000".to_string() }
fn default_coinbase_url() -> String { COINBASE_REST_URL.to_string() }
fn default_coinbase_product() -> String { "BTC-USD".to_string() }
fn default_gemini_url() -> String { GEMINI_REST_URL.to_string() }
fn default_gemini_symbol() -> String { "BTCUSD".to_string() }

impl Default for CoinbaseSettings {
    fn default() -> Self {
        Self { base_url: default_coinbase_url(), product: default_coinbase_product() }
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self { base_url: default_gemini_url(), symbol: default_gemini_symbol() }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_qty: default_qty(),
            base_asset: default_base_asset(),
            quote_asset: default_quote_asset(),
            request_timeout_ms: default_request_timeout_ms(),
            rate_limit_interval_ms: default_rate_limit_interval_ms(),
            log_filter: default_log_filter(),
            user_agent: default_user_agent(),
            metrics_addr: default_metrics_addr(),
            coinbase: CoinbaseSettings::default(),
            gemini: GeminiSettings::default(),
        }
    }
}

impl Settings {
    /// Layers, lowest priority first: built-in defaults, the config file
    /// (`path` if given and required, else optional `config/default.*`), then
    /// `AGGBOOK__*` environment variables (`AGGBOOK__GEMINI__SYMBOL=ETHUSD`).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_interval_ms)
    }
}
