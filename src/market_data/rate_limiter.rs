use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::trace;

/// Per-key minimum-interval gate.
///
/// A call for `key` is allowed when the key has never been seen or at least
/// `interval` has elapsed since its last allowed call. Suppressed calls do
/// not move the key's timestamp. Time is passed in so tests control it.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    last_called: HashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_called: HashMap::new() }
    }

    /// Returns true and records `now` if `key` may be called at `now`.
    pub fn check(&mut self, key: &str, now: Instant) -> bool {
        let allowed = match self.last_called.get(key) {
            None => true,
            Some(last) => now.saturating_duration_since(*last) >= self.interval,
        };
        if allowed {
            self.last_called.insert(key.to_string(), now);
        }
        trace!(key, allowed, "Rate limiter check");
        allowed
    }

    // Time left before `key` is allowed again, zero if it already is
    pub fn remaining(&self, key: &str, now: Instant) -> Duration {
        match self.last_called.get(key) {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(*last)),
        }
    }
}
