//! Theion Forms - form handling core for the Theion Consulting site
//!
//! This library holds the policy logic behind the site's forms:
//!
//! - **Validation**: schema-driven checks for the contact, credential,
//!   profile message and profile update forms
//! - **Rate limiting**: an injected, in-memory sliding-window limiter
//! - **Auth errors**: identity provider codes mapped to safe messages
//! - **Forms / payments**: the payloads and records pages hand to the
//!   hosted backend
//!
//! Pages call in here; rendering, routing and network transport stay
//! outside the crate.

pub mod auth_errors;
pub mod config;
pub mod constants;
pub mod error;
pub mod forms;
pub mod logging;
pub mod payment;
pub mod rate_limit;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use auth_errors::{AuthError, AuthErrorKind, get_auth_error_message};
pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
pub use forms::FormGuard;
pub use rate_limit::{
    AUTH_RATE_LIMIT, FORM_RATE_LIMIT, MESSAGE_RATE_LIMIT, RateLimitConfig, RateLimitDecision,
    RateLimiter,
};
pub use utils::time::format_remaining_time;
pub use validation::{SchemaName, ValidationResult, validate, validate_form, validate_named};
