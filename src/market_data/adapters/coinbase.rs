// Coinbase Exchange level-2 REST snapshot

use tracing::{debug, instrument};

use super::coinbase_types::{CoinbaseBook, CoinbaseLevel};
use super::{get_json, VenueAdapter};
use crate::engine::types::{BookSnapshot, PriceLevel};
use crate::error::FetchResult;
use crate::market_data::normaliser;

pub const COINBASE_REST_URL: &str = "https://api.exchange.coinbase.com";
pub const VENUE: &str = "coinbase";

pub struct CoinbaseAdapter {
    pub base_url: String, // "https://api.exchange.coinbase.com"
    pub product: String,  // e.g. "BTC-USD"
}

impl CoinbaseAdapter {
    pub fn new(base_url: &str, product: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            product: product.to_string(),
        }
    }

    pub fn book_url(&self) -> String {
        format!("{}/products/{}/book?level=2", self.base_url, self.product)
    }

    pub fn into_snapshot(book: &CoinbaseBook) -> FetchResult<BookSnapshot> {
        let bids = Self::norm_side(&book.bids)?;
        let asks = Self::norm_side(&book.asks)?;
        Ok(BookSnapshot::new(VENUE, bids, asks))
    }

    fn norm_side(side: &[CoinbaseLevel]) -> FetchResult<Vec<PriceLevel>> {
        normaliser::side(side.iter().map(|lvl| (lvl.price(), lvl.size())))
    }
}

impl Default for CoinbaseAdapter {
    fn default() -> Self {
        Self::new(COINBASE_REST_URL, "BTC-USD")
    }
}

#[async_trait::async_trait]
impl VenueAdapter for CoinbaseAdapter {
    fn venue(&self) -> &'static str {
        VENUE
    }

    #[instrument(level = "debug", skip_all, fields(venue = VENUE, product = %self.product))]
    async fn fetch_snapshot(&self, client: &reqwest::Client) -> FetchResult<BookSnapshot> {
        let book: CoinbaseBook = get_json(client, &self.book_url()).await?;
        let snapshot = Self::into_snapshot(&book)?;
        debug!(
            bids = snapshot.bids.len(),
            asks = snapshot.asks.len(),
            sequence = ?book.sequence,
            "Fetched Coinbase book"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    const PAYLOAD: &str = r#"{
        "bids": [["64000.10", "0.5", 3], ["63999.00", "1.25", 1]],
        "asks": [["64001.00", "0.75", 2]],
        "sequence": 123456,
        "auction_mode": false,
        "auction": null,
        "time": "2024-05-01T00:00:00.000Z"
    }"#;

    #[test]
    fn test_parse_level2_payload() {
        let book: CoinbaseBook = serde_json::from_str(PAYLOAD).unwrap();
        let snapshot = CoinbaseAdapter::into_snapshot(&book).unwrap();

        assert_eq!(snapshot.venue, "coinbase");
        assert_eq!(snapshot.bids, vec![PriceLevel::new(64000.10, 0.5), PriceLevel::new(63999.0, 1.25)]);
        assert_eq!(snapshot.asks, vec![PriceLevel::new(64001.0, 0.75)]);
    }

    #[test]
    fn test_missing_side_fails_to_decode() {
        let res = serde_json::from_str::<CoinbaseBook>(r#"{"bids": []}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_non_numeric_level_fails_the_venue() {
        let book: CoinbaseBook =
            serde_json::from_str(r#"{"bids": [["abc", "1.0", 1]], "asks": []}"#).unwrap();
        let res = CoinbaseAdapter::into_snapshot(&book);
        assert!(matches!(res, Err(FetchError::InvalidLevel { .. })));
    }

    #[test]
    fn test_book_url() {
        let adapter = CoinbaseAdapter::new("http://localhost:8080/", "BTC-USD");
        assert_eq!(adapter.book_url(), "http://localhost:8080/products/BTC-USD/book?level=2");
    }
}
