// Aggregator orchestrates adapters + rate limiter + engine for one quote
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::Settings;
use crate::engine::book::CombinedBook;
use crate::engine::execution;
use crate::engine::types::{BookSnapshot, ExecutionQuote, Side};
use crate::error::FetchError;
use crate::market_data::adapters::coinbase::CoinbaseAdapter;
use crate::market_data::adapters::gemini::GeminiAdapter;
use crate::market_data::adapters::VenueAdapter;
use crate::market_data::rate_limiter::RateLimiter;

/// What happened to one venue during a fetch cycle.
#[derive(Debug)]
pub enum SourceOutcome {
    Fresh(BookSnapshot),
    Throttled,
    Failed(FetchError),
}

impl SourceOutcome {
    fn label(&self) -> &'static str {
        match self {
            SourceOutcome::Fresh(_) => "ok",
            SourceOutcome::Throttled => "throttled",
            SourceOutcome::Failed(_) => "error",
        }
    }
}

#[derive(Debug)]
pub struct SourceReport {
    pub venue: &'static str,
    pub outcome: SourceOutcome,
}

impl SourceReport {
    /// Degrade to the snapshot the engine sees: anything but a fresh book is empty.
    pub fn into_snapshot(self) -> BookSnapshot {
        match self.outcome {
            SourceOutcome::Fresh(snapshot) => snapshot,
            SourceOutcome::Throttled | SourceOutcome::Failed(_) => BookSnapshot::empty(self.venue),
        }
    }
}

pub struct Aggregator {
    adapters: Vec<Box<dyn VenueAdapter>>,
    limiter: Arc<Mutex<RateLimiter>>,
    client: reqwest::Client,
}

impl Aggregator {
    pub fn new(adapters: Vec<Box<dyn VenueAdapter>>, limiter: Arc<Mutex<RateLimiter>>, client: reqwest::Client) -> Self {
        Self { adapters, limiter, client }
    }

    /// Coinbase + Gemini wired from settings, sharing one limiter and one client.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.user_agent.as_str())
            .build()?;

        let adapters: Vec<Box<dyn VenueAdapter>> = vec![
            Box::new(CoinbaseAdapter::new(&settings.coinbase.base_url, &settings.coinbase.product)),
            Box::new(GeminiAdapter::new(&settings.gemini.base_url, &settings.gemini.symbol)),
        ];
        let limiter = Arc::new(Mutex::new(RateLimiter::new(settings.rate_limit_interval())));

        Ok(Self::new(adapters, limiter, client))
    }

    pub fn venues(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.venue()).collect()
    }

    pub async fn collect(&self) -> Vec<SourceReport> {
        self.collect_at(Instant::now()).await
    }

    /// Fetch every venue concurrently. Reports come back in adapter order,
    /// which fixes the tie order of equal prices in the merged book.
    #[instrument(level = "debug", skip_all)]
    pub async fn collect_at(&self, now: Instant) -> Vec<SourceReport> {
        let fetches = self.adapters.iter().map(|adapter| self.fetch_one(adapter.as_ref(), now));
        join_all(fetches).await
    }

    async fn fetch_one(&self, adapter: &dyn VenueAdapter, now: Instant) -> SourceReport {
        let venue = adapter.venue();
        // lock released before the request goes out
        let (allowed, wait) = {
            let mut limiter = self.limiter.lock();
            let allowed = limiter.check(venue, now);
            (allowed, limiter.remaining(venue, now))
        };

        let outcome = if !allowed {
            debug!(venue, wait_ms = wait.as_millis() as u64, "Fetch suppressed by rate limiter");
            SourceOutcome::Throttled
        } else {
            match adapter.fetch_snapshot(&self.client).await {
                Ok(snapshot) => {
                    if snapshot.is_empty() {
                        warn!(venue, "Venue returned an empty book");
                    }
                    SourceOutcome::Fresh(snapshot)
                }
                Err(e) => {
                    warn!(venue, kind = e.kind(), error = %e, "Venue fetch failed, using empty book");
                    SourceOutcome::Failed(e)
                }
            }
        };

        metrics::counter!("aggbook_fetch_total", "venue" => venue, "outcome" => outcome.label()).increment(1);
        SourceReport { venue, outcome }
    }

    /// Fetch, merge and walk both sides for `qty`.
    pub async fn quote(&self, qty: f64) -> ExecutionQuote {
        let snapshots: Vec<BookSnapshot> = self.collect().await.into_iter().map(SourceReport::into_snapshot).collect();
        let book = CombinedBook::from_snapshots(&snapshots);
        quote_book(&book, qty)
    }
}

/// Buy walks the asks, sell walks the bids.
pub fn quote_book(book: &CombinedBook, qty: f64) -> ExecutionQuote {
    metrics::gauge!("aggbook_book_levels", "side" => "bid").set(book.bids.len() as f64);
    metrics::gauge!("aggbook_book_levels", "side" => "ask").set(book.asks.len() as f64);

    if book.is_empty() {
        warn!("No liquidity from any venue, quoting zero");
    }

    let buy = execution::fill(book.side(Side::Ask), qty);
    let sell = execution::fill(book.side(Side::Bid), qty);

    if !buy.is_complete(qty) {
        warn!(qty, filled = buy.filled, "Ask depth insufficient, buy cost covers partial quantity");
    }
    if !sell.is_complete(qty) {
        warn!(qty, filled = sell.filled, "Bid depth insufficient, sell proceeds cover partial quantity");
    }

    let mut quote = ExecutionQuote::new(qty, buy, sell);
    quote.best_bid = book.best_bid().map(|l| l.price);
    quote.best_ask = book.best_ask().map(|l| l.price);
    quote.spread = book.spread();

    info!(
        qty,
        bid_levels = book.bids.len(),
        ask_levels = book.asks.len(),
        bid_depth = book.depth(Side::Bid),
        ask_depth = book.depth(Side::Ask),
        best_bid = ?quote.best_bid,
        best_ask = ?quote.best_ask,
        spread = ?quote.spread,
        buy_cost = buy.notional,
        buy_vwap = ?quote.buy_vwap,
        sell_proceeds = sell.notional,
        sell_vwap = ?quote.sell_vwap,
        "Computed execution quote"
    );

    quote
}
