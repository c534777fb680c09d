use ordered_float::OrderedFloat;
use tracing::{instrument, trace};

use crate::engine::types::{BookSnapshot, PriceLevel, Side};

/// Concatenates every source's levels for one side and re-sorts them best-first.
///
/// Bids come out descending by price, asks ascending. The sort is stable, so
/// levels at the same price keep the order in which the sources were passed in.
/// Equal prices from different venues stay as separate entries.
pub fn merge<I, S>(sides: I, side: Side) -> Vec<PriceLevel>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[PriceLevel]>,
{
    let mut combined: Vec<PriceLevel> = Vec::new();
    for levels in sides {
        combined.extend_from_slice(levels.as_ref());
    }

    match side {
        Side::Bid => combined.sort_by(|a, b| OrderedFloat(b.price).cmp(&OrderedFloat(a.price))),
        Side::Ask => combined.sort_by(|a, b| OrderedFloat(a.price).cmp(&OrderedFloat(b.price))),
    }

    trace!(?side, levels = combined.len(), "Merged book side");
    combined
}

// Virtual book built from every venue snapshot of one fetch cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedBook {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl CombinedBook {
    #[instrument(level = "debug", skip_all, fields(venues = snapshots.len()))]
    pub fn from_snapshots(snapshots: &[BookSnapshot]) -> Self {
        let bids = merge(snapshots.iter().map(|s| s.bids.as_slice()), Side::Bid);
        let asks = merge(snapshots.iter().map(|s| s.asks.as_slice()), Side::Ask);
        Self { bids, asks }
    }

    pub fn side(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.first().copied()
    }

    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    // Total size resting on one side
    pub fn depth(&self, side: Side) -> f64 {
        self.side(side).iter().map(|l| l.size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(raw: &[(f64, f64)]) -> Vec<PriceLevel> {
        raw.iter().copied().map(PriceLevel::from).collect()
    }

    #[test]
    fn test_merge_bids_descending() {
        let a = levels(&[(50.0, 1.0)]);
        let b = levels(&[(55.0, 2.0)]);
        let combined = merge([a, b], Side::Bid);
        assert_eq!(combined, levels(&[(55.0, 2.0), (50.0, 1.0)]));
    }

    #[test]
    fn test_merge_asks_ascending() {
        let a = levels(&[(103.0, 1.0), (101.0, 0.5)]);
        let b = levels(&[(102.0, 2.0), (100.0, 4.0)]);
        let combined = merge([a, b], Side::Ask);
        let prices: Vec<f64> = combined.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![100.0, 101.0, 102.0, 103.0]);
    }

    #[test]
    fn test_merge_keeps_equal_prices_separate_in_source_order() {
        let coinbase = levels(&[(100.0, 1.0)]);
        let gemini = levels(&[(100.0, 2.0)]);

        let bids = merge([coinbase.clone(), gemini.clone()], Side::Bid);
        assert_eq!(bids, levels(&[(100.0, 1.0), (100.0, 2.0)]));

        let asks = merge([gemini, coinbase], Side::Ask);
        assert_eq!(asks, levels(&[(100.0, 2.0), (100.0, 1.0)]));
    }

    #[test]
    fn test_merge_empty_inputs() {
        let none: Vec<Vec<PriceLevel>> = Vec::new();
        assert!(merge(none, Side::Bid).is_empty());

        let all_empty: Vec<Vec<PriceLevel>> = vec![Vec::new(), Vec::new()];
        assert!(merge(all_empty, Side::Ask).is_empty());
    }

    #[test]
    fn test_merge_does_not_alter_levels() {
        let a = levels(&[(10.0, 0.0), (12.5, 3.25)]);
        let combined = merge([a.as_slice()], Side::Bid);
        assert_eq!(combined, levels(&[(12.5, 3.25), (10.0, 0.0)]));
    }

    #[test]
    fn test_combined_book_from_snapshots() {
        let snapshots = vec![
            BookSnapshot::new("coinbase", levels(&[(99.0, 1.0)]), levels(&[(101.0, 1.0)])),
            BookSnapshot::empty("gemini"),
            BookSnapshot::new("kraken", levels(&[(99.5, 2.0)]), levels(&[(100.5, 0.5)])),
        ];
        let book = CombinedBook::from_snapshots(&snapshots);

        assert_eq!(book.best_bid(), Some(PriceLevel::new(99.5, 2.0)));
        assert_eq!(book.best_ask(), Some(PriceLevel::new(100.5, 0.5)));
        assert_eq!(book.spread(), Some(1.0));
        assert_eq!(book.depth(Side::Bid), 3.0);
        assert_eq!(book.depth(Side::Ask), 1.5);
    }

    #[test]
    fn test_combined_book_all_sources_failed() {
        let snapshots = vec![BookSnapshot::empty("coinbase"), BookSnapshot::empty("gemini")];
        let book = CombinedBook::from_snapshots(&snapshots);
        assert!(book.is_empty());
        assert_eq!(book.spread(), None);
    }
}
