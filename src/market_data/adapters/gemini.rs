// Gemini public order book REST snapshot

use tracing::{debug, instrument};

use super::gemini_types::{GeminiBook, GeminiLevel};
use super::{get_json, VenueAdapter};
use crate::engine::types::{BookSnapshot, PriceLevel};
use crate::error::FetchResult;
use crate::market_data::normaliser;

pub const GEMINI_REST_URL: &str = "https://api.gemini.com";
pub const VENUE: &str = "gemini";

pub struct GeminiAdapter {
    pub base_url: String, // "https://api.gemini.com"
    pub symbol: String,   // e.g. "BTCUSD"
}

impl GeminiAdapter {
    pub fn new(base_url: &str, symbol: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            symbol: symbol.to_string(),
        }
    }

    pub fn book_url(&self) -> String {
        format!("{}/v1/book/{}", self.base_url, self.symbol)
    }

    pub fn into_snapshot(book: &GeminiBook) -> FetchResult<BookSnapshot> {
        let bids = Self::norm_side(&book.bids)?;
        let asks = Self::norm_side(&book.asks)?;
        Ok(BookSnapshot::new(VENUE, bids, asks))
    }

    fn norm_side(side: &[GeminiLevel]) -> FetchResult<Vec<PriceLevel>> {
        normaliser::side(side.iter().map(|lvl| (lvl.price.as_str(), lvl.amount.as_str())))
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new(GEMINI_REST_URL, "BTCUSD")
    }
}

#[async_trait::async_trait]
impl VenueAdapter for GeminiAdapter {
    fn venue(&self) -> &'static str {
        VENUE
    }

    #[instrument(level = "debug", skip_all, fields(venue = VENUE, symbol = %self.symbol))]
    async fn fetch_snapshot(&self, client: &reqwest::Client) -> FetchResult<BookSnapshot> {
        let book: GeminiBook = get_json(client, &self.book_url()).await?;
        let snapshot = Self::into_snapshot(&book)?;
        debug!(bids = snapshot.bids.len(), asks = snapshot.asks.len(), "Fetched Gemini book");
        Ok(snapshot)
    }
}
