use aggbook_rs::{estimate, fill, merge, PriceLevel, Side};
use proptest::prelude::*;

// Integer-valued prices and sizes keep f64 sums exact, so properties can use ==.
fn level() -> impl Strategy<Value = PriceLevel> {
    (1u32..10_000, 0u32..50).prop_map(|(p, s)| PriceLevel::new(p as f64, s as f64))
}

fn source() -> impl Strategy<Value = Vec<PriceLevel>> {
    prop::collection::vec(level(), 0..20)
}

fn sources() -> impl Strategy<Value = Vec<Vec<PriceLevel>>> {
    prop::collection::vec(source(), 0..4)
}

proptest! {
    #[test]
    fn merged_bids_are_non_increasing(srcs in sources()) {
        let bids = merge(&srcs, Side::Bid);
        prop_assert!(bids.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn merged_asks_are_non_decreasing(srcs in sources()) {
        let asks = merge(&srcs, Side::Ask);
        prop_assert!(asks.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn merge_keeps_every_level(srcs in sources()) {
        let total: usize = srcs.iter().map(Vec::len).sum();
        prop_assert_eq!(merge(&srcs, Side::Bid).len(), total);
        prop_assert_eq!(merge(&srcs, Side::Ask).len(), total);
    }

    #[test]
    fn merge_is_repeatable(srcs in sources()) {
        prop_assert_eq!(merge(&srcs, Side::Bid), merge(&srcs, Side::Bid));
        prop_assert_eq!(merge(&srcs, Side::Ask), merge(&srcs, Side::Ask));
    }

    #[test]
    fn satisfiable_quantity_is_filled_exactly(srcs in sources(), pick in 1u32..1_000) {
        let asks = merge(&srcs, Side::Ask);
        let depth: f64 = asks.iter().map(|l| l.size).sum();
        prop_assume!(depth >= 1.0);

        let qty = (pick as f64).min(depth);
        let result = fill(&asks, qty);
        prop_assert_eq!(result.filled, qty);
        prop_assert!(result.is_complete(qty));
    }

    #[test]
    fn filled_never_exceeds_request(srcs in sources(), qty in 1u32..2_000) {
        let bids = merge(&srcs, Side::Bid);
        let result = fill(&bids, qty as f64);
        prop_assert!(result.filled <= qty as f64);
    }

    #[test]
    fn larger_quantity_never_costs_less(srcs in sources(), a in 0u32..500, b in 0u32..500) {
        let asks = merge(&srcs, Side::Ask);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(estimate(&asks, lo as f64) <= estimate(&asks, hi as f64));
    }

    #[test]
    fn zero_quantity_is_free(srcs in sources()) {
        let asks = merge(&srcs, Side::Ask);
        prop_assert_eq!(estimate(&asks, 0.0), 0.0);
    }
}

#[test]
fn empty_book_estimates_zero() {
    for qty in [0.5, 1.0, 1_000.0] {
        assert_eq!(estimate(&[], qty), 0.0);
    }
}

#[test]
fn merged_two_venue_scenario() {
    let coinbase = vec![PriceLevel::new(50.0, 1.0)];
    let gemini = vec![PriceLevel::new(55.0, 2.0)];
    let bids = merge([coinbase, gemini], Side::Bid);
    assert_eq!(bids, vec![PriceLevel::new(55.0, 2.0), PriceLevel::new(50.0, 1.0)]);
    assert_eq!(estimate(&bids, 2.5), 55.0 * 2.0 + 50.0 * 0.5);
}
