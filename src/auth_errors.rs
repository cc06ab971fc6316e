//! Identity provider error normalization
//!
//! Maps the error codes reported by the hosted identity provider to fixed,
//! user-facing messages. Sign-in failures share one message so a visitor
//! cannot tell a missing account from a wrong password. Anything
//! unrecognized gets a generic fallback; raw codes never reach the page.

use serde::Deserialize;
use serde_json::Value;

use crate::constants::auth_codes;

/// Shared by every failed sign-in, whatever the cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";

/// Returned for unknown or missing codes
pub const FALLBACK_MESSAGE: &str = "Authentication failed. Please try again.";

/// Known categories of identity provider failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    InvalidCredentials,
    EmailAlreadyInUse,
    WeakPassword,
    InvalidEmail,
    TooManyRequests,
    NetworkFailure,
    PopupClosed,
    DifferentCredential,
    Unknown,
}

impl AuthErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            auth_codes::USER_NOT_FOUND
            | auth_codes::WRONG_PASSWORD
            | auth_codes::INVALID_CREDENTIAL => Self::InvalidCredentials,
            auth_codes::EMAIL_ALREADY_IN_USE => Self::EmailAlreadyInUse,
            auth_codes::WEAK_PASSWORD => Self::WeakPassword,
            auth_codes::INVALID_EMAIL => Self::InvalidEmail,
            auth_codes::TOO_MANY_REQUESTS => Self::TooManyRequests,
            auth_codes::NETWORK_REQUEST_FAILED => Self::NetworkFailure,
            auth_codes::POPUP_CLOSED_BY_USER => Self::PopupClosed,
            auth_codes::ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL => Self::DifferentCredential,
            _ => Self::Unknown,
        }
    }

    /// Stable name for logs; never the provider's code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::EmailAlreadyInUse => "email_already_in_use",
            Self::WeakPassword => "weak_password",
            Self::InvalidEmail => "invalid_email",
            Self::TooManyRequests => "too_many_requests",
            Self::NetworkFailure => "network_failure",
            Self::PopupClosed => "popup_closed",
            Self::DifferentCredential => "different_credential",
            Self::Unknown => "unknown",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            // Still hints that the address is registered; kept as shipped.
            Self::EmailAlreadyInUse => "Unable to create account. Please try logging in instead.",
            Self::WeakPassword => "Password must be at least 6 characters.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::TooManyRequests => "Too many attempts. Please wait before trying again.",
            Self::NetworkFailure => "Network error. Please check your connection.",
            Self::PopupClosed => "Sign in was cancelled. Please try again.",
            Self::DifferentCredential => {
                "An account already exists with this email using a different sign-in method."
            }
            Self::Unknown => FALLBACK_MESSAGE,
        }
    }
}

/// Error shape reported by the identity provider SDK.
///
/// Only `code` is read. `message` is accepted so whole error objects can be
/// deserialized, but it is never surfaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        self.code
            .as_deref()
            .map(AuthErrorKind::from_code)
            .unwrap_or(AuthErrorKind::Unknown)
    }

    pub fn user_message(&self) -> &'static str {
        normalize(self.kind())
    }
}

/// Message for an arbitrary raw error value.
///
/// Accepts anything: a missing value, a non-object, an object without a
/// string `code`. All of those yield [`FALLBACK_MESSAGE`].
pub fn get_auth_error_message(raw: Option<&Value>) -> &'static str {
    let kind = raw
        .and_then(|value| value.get("code"))
        .and_then(Value::as_str)
        .map(AuthErrorKind::from_code)
        .unwrap_or(AuthErrorKind::Unknown);
    normalize(kind)
}

fn normalize(kind: AuthErrorKind) -> &'static str {
    tracing::debug!(category = kind.as_str(), "Normalized identity provider error");
    kind.message()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message_for(code: &str) -> &'static str {
        get_auth_error_message(Some(&json!({ "code": code })))
    }

    #[test]
    fn test_sign_in_failures_are_indistinguishable() {
        let not_found = message_for("auth/user-not-found");
        assert_eq!(not_found, message_for("auth/wrong-password"));
        assert_eq!(not_found, message_for("auth/invalid-credential"));
        assert_eq!(not_found, INVALID_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_unknown_and_missing_use_fallback() {
        assert_eq!(message_for("auth/totally-unknown"), FALLBACK_MESSAGE);
        assert_eq!(get_auth_error_message(None), FALLBACK_MESSAGE);
        assert_eq!(get_auth_error_message(Some(&json!(null))), FALLBACK_MESSAGE);
        assert_eq!(get_auth_error_message(Some(&json!("auth/wrong-password"))), FALLBACK_MESSAGE);
        assert_eq!(get_auth_error_message(Some(&json!({ "code": 17 }))), FALLBACK_MESSAGE);
        assert_eq!(get_auth_error_message(Some(&json!({}))), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(
            message_for("auth/email-already-in-use"),
            "Unable to create account. Please try logging in instead."
        );
        assert_eq!(message_for("auth/weak-password"), "Password must be at least 6 characters.");
        assert_eq!(message_for("auth/invalid-email"), "Please enter a valid email address.");
        assert_eq!(
            message_for("auth/too-many-requests"),
            "Too many attempts. Please wait before trying again."
        );
        assert_eq!(
            message_for("auth/network-request-failed"),
            "Network error. Please check your connection."
        );
        assert_eq!(
            message_for("auth/popup-closed-by-user"),
            "Sign in was cancelled. Please try again."
        );
        assert_eq!(
            message_for("auth/account-exists-with-different-credential"),
            "An account already exists with this email using a different sign-in method."
        );
    }

    #[test]
    fn test_messages_never_echo_raw_input() {
        let raw = json!({
            "code": "auth/internal-error",
            "message": "Firebase: Error (auth/internal-error). stack at x.js:1"
        });
        let message = get_auth_error_message(Some(&raw));
        assert!(!message.contains("auth/"));
        assert!(!message.contains("stack"));
    }

    #[test]
    fn test_typed_auth_error() {
        let err: AuthError = serde_json::from_value(json!({
            "code": "auth/wrong-password",
            "message": "Firebase: Error (auth/wrong-password)."
        }))
        .unwrap();
        assert_eq!(err.kind(), AuthErrorKind::InvalidCredentials);
        assert_eq!(err.user_message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(AuthError::default().user_message(), FALLBACK_MESSAGE);
    }
}
