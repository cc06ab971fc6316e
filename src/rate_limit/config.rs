//! Rate limit settings and the presets used by the site forms

use std::num::NonZeroU32;
use std::time::Duration;

use crate::constants::rate_limits::{
    AUTH_MAX_ATTEMPTS, AUTH_WINDOW_MS, FORM_MAX_ATTEMPTS, FORM_WINDOW_MS, MESSAGE_MAX_ATTEMPTS,
    MESSAGE_WINDOW_MS,
};
use crate::error::{AppError, AppResult};

/// How many attempts a key may make within a trailing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_attempts: NonZeroU32,
    pub window: Duration,
}

const fn preset(max_attempts: u32, window_ms: u64) -> RateLimitConfig {
    match NonZeroU32::new(max_attempts) {
        Some(max_attempts) => RateLimitConfig::from_millis(max_attempts, window_ms),
        None => panic!("rate limit presets need at least one attempt"),
    }
}

/// 5 sign-in attempts per minute
pub const AUTH_RATE_LIMIT: RateLimitConfig = preset(AUTH_MAX_ATTEMPTS, AUTH_WINDOW_MS);

/// 3 contact form submissions per minute
pub const FORM_RATE_LIMIT: RateLimitConfig = preset(FORM_MAX_ATTEMPTS, FORM_WINDOW_MS);

/// 5 profile messages per 5 minutes
pub const MESSAGE_RATE_LIMIT: RateLimitConfig = preset(MESSAGE_MAX_ATTEMPTS, MESSAGE_WINDOW_MS);

impl RateLimitConfig {
    pub const fn from_millis(max_attempts: NonZeroU32, window_ms: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_millis(window_ms),
        }
    }

    /// Build a config from raw numbers; both must be positive.
    pub fn new(max_attempts: u32, window_ms: u64) -> AppResult<Self> {
        let max_attempts = NonZeroU32::new(max_attempts).ok_or_else(|| {
            AppError::InvalidInput("max attempts must be positive".to_string())
        })?;
        if window_ms == 0 {
            return Err(AppError::InvalidInput("window must be positive".to_string()));
        }
        Ok(Self::from_millis(max_attempts, window_ms))
    }

    pub fn window_ms(&self) -> u64 {
        u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX)
    }
}
