//! Multi-venue order book aggregator.
//!
//! Pulls level-2 snapshots from Coinbase and Gemini, merges them into one
//! virtual book and estimates what it costs to buy, or what selling yields,
//! for a given quantity by walking that book best-first.

pub mod config;
pub mod engine;
pub mod error;
pub mod market_data;
pub mod report;
pub mod telemetry;

pub use crate::config::Settings;
pub use engine::book::{merge, CombinedBook};
pub use engine::execution::{estimate, fill};
pub use engine::types::{BookSnapshot, ExecutionQuote, Fill, PriceLevel, Side};
pub use market_data::aggregator::Aggregator;
