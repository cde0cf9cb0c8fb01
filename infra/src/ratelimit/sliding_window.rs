//! In-memory sliding-window rate limiter
//!
//! Tracks per-client-key hit timestamps and admits a request only when
//! fewer than `max_requests` hits fall inside the trailing window. A
//! denied request is not recorded, so a client hammering the gateway
//! still recovers exactly one window after its last admitted hit.
//!
//! The table is capped at `max_clients` keys. When full, a key whose
//! window has gone stale is evicted first; failing that, the least
//! recently seen key goes.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use fg_core::services::ratelimit::RateLimiter;
use fg_shared::config::RateLimitConfig;

struct ClientWindow {
    hits: VecDeque<Instant>,
    last_seen: Instant,
}

/// Sliding-window limiter over an in-memory table
pub struct SlidingWindowRateLimiter {
    windows: Mutex<HashMap<String, ClientWindow>>,
    config: RateLimitConfig,
}

impl SlidingWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
        }
    }

    fn window(&self) -> Duration {
        Duration::from_millis(self.config.window_ms)
    }

    /// Number of client keys currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().unwrap().len()
    }

    /// Admission decision at an explicit instant
    fn allow_at(&self, client_key: &str, now: Instant) -> bool {
        let window = self.window();
        let mut windows = self.windows.lock().unwrap();

        if !windows.contains_key(client_key) && windows.len() >= self.config.max_clients {
            evict_one(&mut windows, now, window);
        }

        let entry = windows
            .entry(client_key.to_string())
            .or_insert_with(|| ClientWindow {
                hits: VecDeque::new(),
                last_seen: now,
            });
        entry.last_seen = now;

        while let Some(oldest) = entry.hits.front() {
            if now.duration_since(*oldest) >= window {
                entry.hits.pop_front();
            } else {
                break;
            }
        }

        if entry.hits.len() >= self.config.max_requests {
            tracing::debug!(
                client_key,
                hits = entry.hits.len(),
                event = "rate_limit_denied",
                "Request refused by sliding window"
            );
            return false;
        }

        entry.hits.push_back(now);
        true
    }
}

/// Drop one entry to make room: a stale window if any exists,
/// otherwise the least recently seen key
fn evict_one(windows: &mut HashMap<String, ClientWindow>, now: Instant, window: Duration) {
    let stale = windows
        .iter()
        .find(|(_, w)| {
            w.hits
                .back()
                .map_or(true, |last| now.duration_since(*last) >= window)
        })
        .map(|(key, _)| key.clone());

    let victim = stale.or_else(|| {
        windows
            .iter()
            .min_by_key(|(_, w)| w.last_seen)
            .map(|(key, _)| key.clone())
    });

    if let Some(key) = victim {
        tracing::debug!(
            client_key = %key,
            event = "rate_limit_evicted",
            "Client key evicted from full table"
        );
        windows.remove(&key);
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowRateLimiter {
    async fn allow(&self, client_key: &str) -> bool {
        self.allow_at(client_key, Instant::now())
    }

    fn retry_after_secs(&self) -> u64 {
        self.config.window_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: usize, window_ms: u64, max_clients: usize) -> SlidingWindowRateLimiter {
        SlidingWindowRateLimiter::new(RateLimitConfig {
            window_ms,
            max_requests,
            max_clients,
        })
    }

    #[test]
    fn admits_up_to_the_limit_then_refuses() {
        let limiter = limiter(3, 60_000, 100);
        let now = Instant::now();
        for _ in 0..3 {
            assert!(limiter.allow_at("1.2.3.4", now));
        }
        assert!(!limiter.allow_at("1.2.3.4", now));
    }

    #[test]
    fn keys_have_independent_windows() {
        let limiter = limiter(1, 60_000, 100);
        let now = Instant::now();
        assert!(limiter.allow_at("1.2.3.4", now));
        assert!(!limiter.allow_at("1.2.3.4", now));
        assert!(limiter.allow_at("5.6.7.8", now));
    }

    #[test]
    fn window_slides_rather_than_resets() {
        let limiter = limiter(2, 1_000, 100);
        let start = Instant::now();
        assert!(limiter.allow_at("k", start));
        assert!(limiter.allow_at("k", start + Duration::from_millis(600)));
        assert!(!limiter.allow_at("k", start + Duration::from_millis(900)));
        // First hit ages out at +1000ms; the second is still in window
        assert!(limiter.allow_at("k", start + Duration::from_millis(1_100)));
        assert!(!limiter.allow_at("k", start + Duration::from_millis(1_200)));
    }

    #[test]
    fn denied_requests_are_not_recorded() {
        let limiter = limiter(2, 1_000, 100);
        let start = Instant::now();
        assert!(limiter.allow_at("k", start));
        assert!(limiter.allow_at("k", start));
        // A burst of refusals must not extend the penalty
        for ms in [100, 200, 300, 400] {
            assert!(!limiter.allow_at("k", start + Duration::from_millis(ms)));
        }
        assert!(limiter.allow_at("k", start + Duration::from_millis(1_050)));
    }

    #[test]
    fn full_table_evicts_stale_keys_first() {
        let limiter = limiter(5, 1_000, 2);
        let start = Instant::now();
        assert!(limiter.allow_at("stale", start));
        assert!(limiter.allow_at("fresh", start + Duration::from_millis(900)));

        // "stale"'s window has elapsed by now; it makes room
        let later = start + Duration::from_millis(1_500);
        assert!(limiter.allow_at("new", later));
        assert_eq!(limiter.tracked_clients(), 2);

        // "fresh" survived the eviction and keeps its count
        let windows = limiter.windows.lock().unwrap();
        assert!(windows.contains_key("fresh"));
        assert!(windows.contains_key("new"));
    }

    #[test]
    fn full_table_falls_back_to_least_recently_seen() {
        let limiter = limiter(5, 60_000, 2);
        let start = Instant::now();
        assert!(limiter.allow_at("old", start));
        assert!(limiter.allow_at("recent", start + Duration::from_millis(10)));
        assert!(limiter.allow_at("new", start + Duration::from_millis(20)));

        let windows = limiter.windows.lock().unwrap();
        assert_eq!(windows.len(), 2);
        assert!(!windows.contains_key("old"));
    }

    #[tokio::test]
    async fn retry_after_matches_the_window() {
        let limiter = limiter(10, 60_000, 100);
        assert_eq!(limiter.retry_after_secs(), 60);
        assert!(limiter.allow("1.2.3.4").await);
    }
}
