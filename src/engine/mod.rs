// Pure aggregation core: merge venue books, walk them for a quantity
pub mod types;     // price levels, snapshots, fills
pub mod book;      // multi-venue merge into one sorted book
pub mod execution; // execution price estimation
