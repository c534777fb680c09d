use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bid, // best-first = highest price
    Ask, // best-first = lowest price
}

// One (price, size) entry in a venue book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub size: f64,
}

impl PriceLevel {
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }
}

impl From<(f64, f64)> for PriceLevel {
    fn from((price, size): (f64, f64)) -> Self {
        Self { price, size }
    }
}

// Point-in-time book for a single venue. Sides arrive in whatever order the venue sent them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSnapshot {
    pub venue: &'static str,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl BookSnapshot {
    pub fn new(venue: &'static str, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { venue, bids, asks }
    }

    /// What a failed or throttled venue contributes to the combined book.
    pub fn empty(venue: &'static str) -> Self {
        Self { venue, bids: Vec::new(), asks: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

// Outcome of walking one side of the book for a target quantity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Fill {
    pub notional: f64,
    pub filled: f64,
    pub levels_consumed: usize,
}

impl Fill {
    /// False when the book ran dry before `qty_required` was reached.
    pub fn is_complete(&self, qty_required: f64) -> bool {
        self.filled >= qty_required
    }

    /// Volume-weighted average price of the filled quantity.
    pub fn average_price(&self) -> Option<f64> {
        if self.filled > 0.0 {
            Some(self.notional / self.filled)
        } else {
            None
        }
    }
}

// Both sides of a quote for one requested quantity, plus the top of the merged book
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExecutionQuote {
    pub qty: f64,
    pub buy: Fill,  // walked against asks
    pub sell: Fill, // walked against bids
    pub buy_vwap: Option<f64>,
    pub sell_vwap: Option<f64>,
    pub best_bid: Option<f64>,
    pub best_ask: Option<f64>,
    pub spread: Option<f64>,
}

impl ExecutionQuote {
    pub fn new(qty: f64, buy: Fill, sell: Fill) -> Self {
        Self {
            qty,
            buy,
            sell,
            buy_vwap: buy.average_price(),
            sell_vwap: sell.average_price(),
            best_bid: None,
            best_ask: None,
            spread: None,
        }
    }

    pub fn buy_cost(&self) -> f64 {
        self.buy.notional
    }

    pub fn sell_proceeds(&self) -> f64 {
        self.sell.notional
    }
}
