//! In-memory sliding-window limiter keyed by an arbitrary string.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::clock::{Clock, SystemClock};
use super::config::RateLimitConfig;

/// Result of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The attempt was recorded
    Allowed,
    /// The attempt was refused; `remaining` is the time until the oldest
    /// counted attempt leaves the window
    Denied { remaining: Duration },
}

impl RateLimitDecision {
    pub fn allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }

    pub fn remaining(&self) -> Option<Duration> {
        match self {
            RateLimitDecision::Allowed => None,
            RateLimitDecision::Denied { remaining } => Some(*remaining),
        }
    }

    /// Remaining wait in whole milliseconds, rounded up
    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining().map(|d| {
            let ms = d.as_millis() + u128::from(d.subsec_nanos() % 1_000_000 != 0);
            u64::try_from(ms).unwrap_or(u64::MAX)
        })
    }
}

/// Sliding-window rate limiter.
///
/// Each key holds the instants of its accepted attempts inside the current
/// window. Expired entries are pruned lazily on every check, so a bucket
/// never grows past `max_attempts`. Denied attempts are not recorded.
///
/// State lives only as long as the limiter: this is a courtesy throttle for
/// page code, not a security boundary. Server-side limits still apply.
/// Clones share the same buckets.
#[derive(Clone)]
pub struct RateLimiter<C: Clock = SystemClock> {
    clock: C,
    buckets: Arc<DashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            buckets: Arc::new(DashMap::new()),
        }
    }

    /// Check and, if allowed, record an attempt for `key`.
    pub fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitDecision {
        let now = self.clock.now();
        let max_attempts = config.max_attempts.get() as usize;

        let mut bucket = self.buckets.entry(key.to_string()).or_default();
        let attempts = bucket.value_mut();

        while let Some(&oldest) = attempts.front() {
            if now.saturating_duration_since(oldest) >= config.window {
                attempts.pop_front();
            } else {
                break;
            }
        }

        if attempts.len() >= max_attempts {
            let elapsed = attempts
                .front()
                .map(|&oldest| now.saturating_duration_since(oldest))
                .unwrap_or_default();
            let remaining = config.window.saturating_sub(elapsed);

            tracing::warn!(
                key,
                attempts = attempts.len(),
                remaining_ms = remaining.as_millis() as u64,
                "Rate limit exceeded"
            );
            return RateLimitDecision::Denied { remaining };
        }

        attempts.push_back(now);
        tracing::debug!(key, attempts = attempts.len(), "Rate limit attempt recorded");
        RateLimitDecision::Allowed
    }

    /// Forget every recorded attempt for `key`.
    pub fn reset(&self, key: &str) {
        if self.buckets.remove(key).is_some() {
            tracing::debug!(key, "Rate limit reset");
        }
    }

    /// Number of attempts currently stored for `key` (as of the last check)
    pub fn attempts(&self, key: &str) -> usize {
        self.buckets.get(key).map(|b| b.len()).unwrap_or(0)
    }
}
