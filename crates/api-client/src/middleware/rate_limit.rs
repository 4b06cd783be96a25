//! Rate limiting for catalogue API calls
//!
//! Token bucket limiter keyed per endpoint, with a burst allowance. Keeps
//! interactive lookups from hammering the backend during keystroke bursts
//! that slip past the single-in-flight rule (e.g. several search surfaces
//! sharing one client).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Rate limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(60),
            burst: 10,
        }
    }
}

impl RateLimitConfig {
    /// Create a strict rate limit (no burst)
    #[must_use]
    pub fn strict(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            burst: 0,
        }
    }

    /// Per-second rate limit
    #[must_use]
    pub fn per_second(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(1),
            burst: max / 2,
        }
    }

    /// Per-minute rate limit
    #[must_use]
    pub fn per_minute(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(60),
            burst: max / 4,
        }
    }
}

/// Token bucket state
#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    config: RateLimitConfig,
}

impl TokenBucket {
    fn new(config: RateLimitConfig) -> Self {
        Self {
            tokens: f64::from(config.max_requests + config.burst),
            last_update: Instant::now(),
            config,
        }
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        let refill_rate = f64::from(self.config.max_requests) / self.config.window.as_secs_f64();
        let new_tokens = elapsed.as_secs_f64() * refill_rate;

        self.tokens = (self.tokens + new_tokens)
            .min(f64::from(self.config.max_requests + self.config.burst));
        self.last_update = now;
    }

    fn available(&mut self) -> u32 {
        self.refill();
        self.tokens as u32
    }

    fn time_until_available(&mut self, tokens: u32) -> Duration {
        self.refill();

        if self.tokens >= f64::from(tokens) {
            return Duration::ZERO;
        }

        let needed = f64::from(tokens) - self.tokens;
        let refill_rate = f64::from(self.config.max_requests) / self.config.window.as_secs_f64();
        Duration::from_secs_f64(needed / refill_rate)
    }
}

/// Rate limiter with one bucket per endpoint key
pub struct RateLimiter {
    buckets: Arc<RwLock<HashMap<String, TokenBucket>>>,
    default_config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Arc::new(RwLock::new(HashMap::new())),
            default_config: config,
        }
    }

    /// Try to acquire a token for the given key
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> bool {
        // Handle poisoned lock by recovering the data (still valid even after panic)
        let mut buckets = self.buckets.write().unwrap_or_else(|e| e.into_inner());
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.default_config.clone()));
        bucket.try_acquire()
    }

    /// Reset rate limit for a key
    pub fn reset(&self, key: &str) {
        let mut buckets = self.buckets.write().unwrap_or_else(|e| e.into_inner());
        buckets.remove(key);
    }

    /// Get rate limit status
    #[must_use]
    pub fn status(&self, key: &str) -> RateLimitStatus {
        let mut buckets = self.buckets.write().unwrap_or_else(|e| e.into_inner());
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.default_config.clone()));

        RateLimitStatus {
            available: bucket.available(),
            max: self.default_config.max_requests + self.default_config.burst,
            reset_in: bucket.time_until_available(self.default_config.max_requests),
        }
    }
}

/// Rate limit status
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatus {
    /// Available tokens
    pub available: u32,
    /// Maximum tokens
    pub max: u32,
    /// Time until full reset
    pub reset_in: Duration,
}
