// Source: https://api.exchange.coinbase.com/products/{product}/book?level=2
use serde::de::IgnoredAny;

#[derive(Debug, serde::Deserialize)]
pub struct CoinbaseBook {
    pub bids: Vec<CoinbaseLevel>,
    pub asks: Vec<CoinbaseLevel>,
    #[serde(default)]
    pub sequence: Option<u64>,
    // other fields (auction_mode, time) ignored
}

// ["price", "size", num_orders]
#[derive(Debug, serde::Deserialize)]
pub struct CoinbaseLevel(pub String, pub String, pub IgnoredAny);

impl CoinbaseLevel {
    pub fn price(&self) -> &str {
        &self.0
    }

    pub fn size(&self) -> &str {
        &self.1
    }
}
