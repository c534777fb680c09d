use crate::engine::types::{Fill, PriceLevel};

/// Walks `book_side` best-first and accumulates the notional needed to fill
/// `qty_required`.
///
/// `book_side` must already be sorted for the side being walked: asks
/// ascending for a buy, bids descending for a sell. The walk stops as soon as
/// the requirement is met; if the book runs out first the partial result is
/// returned as is.
pub fn fill(book_side: &[PriceLevel], qty_required: f64) -> Fill {
    let mut result = Fill::default();
    if qty_required <= 0.0 {
        return result;
    }

    for level in book_side {
        let fillable = level.size.min(qty_required - result.filled);
        result.notional += fillable * level.price;
        result.filled += fillable;
        result.levels_consumed += 1;
        if result.filled >= qty_required {
            break;
        }
    }

    result
}

/// Total notional to fill `qty_required` against `book_side`.
///
/// A book that is too thin yields the notional of whatever could be filled;
/// use [`fill`] when the filled quantity matters.
pub fn estimate(book_side: &[PriceLevel], qty_required: f64) -> f64 {
    fill(book_side, qty_required).notional
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(raw: &[(f64, f64)]) -> Vec<PriceLevel> {
        raw.iter().copied().map(PriceLevel::from).collect()
    }

    #[test]
    fn test_buy_walks_two_levels() {
        let asks = levels(&[(100.0, 1.0), (101.0, 2.0)]);
        assert_eq!(estimate(&asks, 2.0), 201.0);
    }

    #[test]
    fn test_sell_partial_fill_on_thin_book() {
        let bids = levels(&[(99.0, 0.5)]);
        let result = fill(&bids, 1.0);
        assert_eq!(result.notional, 49.5);
        assert_eq!(result.filled, 0.5);
        assert!(!result.is_complete(1.0));
        assert_eq!(estimate(&bids, 1.0), 49.5);
    }

    #[test]
    fn test_zero_quantity_consumes_nothing() {
        let asks = levels(&[(100.0, 1.0)]);
        let result = fill(&asks, 0.0);
        assert_eq!(result, Fill::default());
        assert_eq!(estimate(&asks, 0.0), 0.0);
    }

    #[test]
    fn test_empty_book() {
        assert_eq!(estimate(&[], 3.0), 0.0);
        assert_eq!(fill(&[], 3.0).levels_consumed, 0);
    }

    #[test]
    fn test_stops_once_filled() {
        let asks = levels(&[(10.0, 5.0), (11.0, 5.0), (12.0, 5.0)]);
        let result = fill(&asks, 5.0);
        assert_eq!(result.levels_consumed, 1);
        assert_eq!(result.notional, 50.0);
        assert!(result.is_complete(5.0));
    }

    #[test]
    fn test_zero_size_levels_are_skipped_over() {
        let asks = levels(&[(10.0, 0.0), (11.0, 2.0)]);
        let result = fill(&asks, 1.0);
        assert_eq!(result.notional, 11.0);
        assert_eq!(result.levels_consumed, 2);
    }

    #[test]
    fn test_average_price() {
        let asks = levels(&[(100.0, 1.0), (102.0, 1.0)]);
        let result = fill(&asks, 2.0);
        assert_eq!(result.average_price(), Some(101.0));
        assert_eq!(Fill::default().average_price(), None);
    }
}
