//! Application configuration management
//!
//! Rate limit windows and the log filter can be tuned through environment
//! variables (or a `.env` file). Unset variables fall back to the defaults in
//! [`crate::constants`].

use std::env;

use crate::constants::{
    DEFAULT_LOG_FILTER,
    rate_limits::{
        AUTH_MAX_ATTEMPTS, AUTH_WINDOW_MS, FORM_MAX_ATTEMPTS, FORM_WINDOW_MS,
        MESSAGE_MAX_ATTEMPTS, MESSAGE_WINDOW_MS,
    },
};
use crate::rate_limit::RateLimitConfig;

/// Main configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub rate_limits: RateLimitSettings,
    /// `tracing` filter directive, from `RUST_LOG`
    pub log_filter: String,
}

/// Per-form rate limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub auth: RateLimitConfig,
    pub form: RateLimitConfig,
    pub message: RateLimitConfig,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            auth: crate::rate_limit::AUTH_RATE_LIMIT,
            form: crate::rate_limit::FORM_RATE_LIMIT,
            message: crate::rate_limit::MESSAGE_RATE_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call once at startup and hand the result to
    /// [`FormGuard::from_config`](crate::forms::FormGuard::from_config).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            rate_limits: RateLimitSettings::from_lookup(&lookup)?,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl RateLimitSettings {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            auth: limit_from_lookup(
                lookup,
                "AUTH_RATE_LIMIT_MAX",
                "AUTH_RATE_LIMIT_WINDOW_MS",
                AUTH_MAX_ATTEMPTS,
                AUTH_WINDOW_MS,
            )?,
            form: limit_from_lookup(
                lookup,
                "FORM_RATE_LIMIT_MAX",
                "FORM_RATE_LIMIT_WINDOW_MS",
                FORM_MAX_ATTEMPTS,
                FORM_WINDOW_MS,
            )?,
            message: limit_from_lookup(
                lookup,
                "MESSAGE_RATE_LIMIT_MAX",
                "MESSAGE_RATE_LIMIT_WINDOW_MS",
                MESSAGE_MAX_ATTEMPTS,
                MESSAGE_WINDOW_MS,
            )?,
        })
    }
}

fn limit_from_lookup<F>(
    lookup: &F,
    max_var: &str,
    window_var: &str,
    default_max: u32,
    default_window_ms: u64,
) -> Result<RateLimitConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let max_attempts: u32 = match lookup(max_var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(max_var.to_string()))?,
        None => default_max,
    };
    let window_ms: u64 = match lookup(window_var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(window_var.to_string()))?,
        None => default_window_ms,
    };

    RateLimitConfig::new(max_attempts, window_ms).map_err(|_| {
        let var = if max_attempts == 0 { max_var } else { window_var };
        ConfigError::InvalidValue(var.to_string())
    })
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

impl From<ConfigError> for crate::error::AppError {
    fn from(err: ConfigError) -> Self {
        crate::error::AppError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.rate_limits, RateLimitSettings::default());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("FORM_RATE_LIMIT_MAX", "10"),
            ("MESSAGE_RATE_LIMIT_WINDOW_MS", " 1000 "),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.rate_limits.form.max_attempts.get(), 10);
        assert_eq!(config.rate_limits.form.window_ms(), 60_000);
        assert_eq!(config.rate_limits.message.window_ms(), 1000);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("AUTH_RATE_LIMIT_MAX", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "AUTH_RATE_LIMIT_MAX"));

        let err = Config::from_lookup(lookup(&[("AUTH_RATE_LIMIT_WINDOW_MS", "0")]))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue(ref v) if v == "AUTH_RATE_LIMIT_WINDOW_MS")
        );
    }

    #[test]
    fn test_invalid_value_becomes_configuration_error() {
        let err: AppError = Config::from_lookup(lookup(&[("FORM_RATE_LIMIT_MAX", "0")]))
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("FORM_RATE_LIMIT_MAX"));
    }
}
