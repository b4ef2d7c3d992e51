//! Per-client sliding-window rate limiting.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use warden_core::RateLimitConfig;

/// Sliding-window request counter keyed by client identity.
///
/// The window slides per request: each call drops timestamps older than the
/// window before counting, so a client gets at most `max_requests` through in
/// any window-sized interval, not per calendar minute.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    hits: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Creates a limiter from configuration.
    #[must_use]
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            window: Duration::from_millis(config.window_ms),
            max_requests: config.max_requests,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Records one request for `client` and reports whether it is allowed.
    pub fn allow(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);
        let timestamps = hits.entry(client.to_string()).or_default();

        while let Some(front) = timestamps.front() {
            if now.duration_since(*front) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() >= self.max_requests as usize {
            return false;
        }
        timestamps.push_back(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(window_ms: u64, max_requests: u32) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig { window_ms, max_requests })
    }

    #[test]
    fn allows_up_to_the_limit_then_denies() {
        let limiter = limiter(60_000, 3);
        assert!(limiter.allow("a"));
        assert!(limiter.allow("a"));
        assert!(limiter.allow("a"));
        assert!(!limiter.allow("a"));
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = limiter(60_000, 1);
        assert!(limiter.allow("a"));
        assert!(!limiter.allow("a"));
        assert!(limiter.allow("b"));
    }

    #[test]
    fn window_expiry_restores_budget() {
        let limiter = limiter(30, 1);
        assert!(limiter.allow("a"));
        assert!(!limiter.allow("a"));
        std::thread::sleep(Duration::from_millis(40));
        assert!(limiter.allow("a"));
    }

    #[test]
    fn denied_requests_do_not_extend_the_window() {
        let limiter = limiter(30, 1);
        assert!(limiter.allow("a"));
        // Hammering while denied must not push the reset point forward.
        for _ in 0..5 {
            assert!(!limiter.allow("a"));
        }
        std::thread::sleep(Duration::from_millis(40));
        assert!(limiter.allow("a"));
    }
}
