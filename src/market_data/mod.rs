// Market data module entrypoint
pub mod adapters;     // venue-specific REST fetchers (Coinbase, Gemini)
pub mod normaliser;   // converts wire strings -> validated price levels
pub mod rate_limiter; // per-venue minimum fetch interval
pub mod aggregator;   // fetches venues in parallel and quotes the merged book
