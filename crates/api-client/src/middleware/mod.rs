//! Middleware components for request/response processing

pub mod rate_limit;

pub use rate_limit::{RateLimitConfig, RateLimitStatus, RateLimiter};
