//! Tracing setup and log-safe wrappers

use std::fmt;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::DEFAULT_LOG_FILTER;

/// Install the global tracing subscriber.
///
/// Falls back to `info` when `filter` does not parse. Returns `false` if a
/// subscriber was already installed, which is harmless.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Email address with the local part masked, for log fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedEmail(String);

impl MaskedEmail {
    pub fn new(email: &str) -> Self {
        Self(Self::mask(email))
    }

    fn mask(email: &str) -> String {
        match email.split_once('@') {
            Some((local, domain)) => {
                let len = local.chars().count();
                let masked_local = match local.chars().next() {
                    Some(first) if len > 2 => format!("{}***", first),
                    _ => "*".repeat(len),
                };
                format!("{}@{}", masked_local, domain)
            }
            None => "***@***".to_string(),
        }
    }
}

impl fmt::Display for MaskedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_email() {
        assert_eq!(MaskedEmail::new("user@example.com").to_string(), "u***@example.com");
        assert_eq!(MaskedEmail::new("ab@test.com").to_string(), "**@test.com");
        assert_eq!(MaskedEmail::new("a@test.com").to_string(), "*@test.com");
        assert_eq!(MaskedEmail::new("invalid-email").to_string(), "***@***");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("debug");
        assert!(!init_tracing("not a [valid filter"));
    }
}
