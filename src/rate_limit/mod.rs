//! Client-side rate limiting
//!
//! A [`RateLimiter`] is created by the caller and passed to whatever needs
//! it; there is no process-wide store. Pick distinct keys per form, since
//! forms sharing a key share a bucket.

pub mod clock;
pub mod config;
pub mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AUTH_RATE_LIMIT, FORM_RATE_LIMIT, MESSAGE_RATE_LIMIT, RateLimitConfig};
pub use limiter::{RateLimitDecision, RateLimiter};
