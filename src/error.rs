//! Custom error types and handling
//!
//! The validation, rate limit and auth-error helpers are total and return
//! structured results. `AppError` is what the higher-level form operations
//! and the payment ledger hand back to page code.

use crate::utils::time::format_remaining_time;

/// Generic text shown for failures that must not leak detail
const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown validation schema: {0}")]
    UnknownSchema(String),

    // Rate limiting
    /// `subject` names what was throttled, e.g. "attempts" or "messages"
    #[error("Too many {subject}. Please wait {}.", wait_text(.retry_after_ms))]
    RateLimited {
        subject: &'static str,
        retry_after_ms: u64,
    },

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Internal errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

fn wait_text(ms: &u64) -> String {
    format_remaining_time(*ms)
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::UnknownSchema(_) => "UNKNOWN_SCHEMA",
            Self::RateLimited { .. } => "TOO_MANY_REQUESTS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field messages carried by a validation failure
    pub fn validation_errors(&self) -> &[String] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Text that is safe to render in a form.
    ///
    /// Validation failures show their first message, the way the pages
    /// display one error at a time. Internal and configuration errors are
    /// logged and collapsed to a generic string.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors
                .first()
                .cloned()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            Self::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            Self::Configuration(e) => {
                tracing::error!("Configuration error: {}", e);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            Self::UnknownSchema(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();
        // field_errors() iterates a HashMap
        messages.sort();
        AppError::Validation(messages)
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Validation(vec![]).error_code(), "VALIDATION_ERROR");
        assert_eq!(
            AppError::RateLimited {
                subject: "attempts",
                retry_after_ms: 1,
            }
            .error_code(),
            "TOO_MANY_REQUESTS"
        );
        assert_eq!(
            AppError::UnknownSchema("x".to_string()).error_code(),
            "UNKNOWN_SCHEMA"
        );
    }

    #[test]
    fn test_rate_limited_message_uses_wait_time() {
        let err = AppError::RateLimited {
            subject: "attempts",
            retry_after_ms: 5000,
        };
        assert_eq!(err.user_message(), "Too many attempts. Please wait 5 seconds.");

        let err = AppError::RateLimited {
            subject: "messages",
            retry_after_ms: 300_000,
        };
        assert_eq!(err.user_message(), "Too many messages. Please wait 5 minutes.");
    }

    #[test]
    fn test_validation_user_message_is_first_error() {
        let err = AppError::Validation(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.user_message(), "first");
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_internal_errors_are_hidden() {
        let err = AppError::Internal(anyhow::anyhow!("datastore offline at 10.0.0.7"));
        assert!(!err.user_message().contains("10.0.0.7"));

        let err = AppError::Configuration("AUTH_RATE_LIMIT_MAX".to_string());
        assert!(!err.user_message().contains("AUTH_RATE_LIMIT_MAX"));
    }
}
