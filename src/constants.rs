//! Application-wide constants
//!
//! This module contains all constant values used by the form layer.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// FIELD BOUNDS
// =============================================================================

/// Contact name length bounds (inclusive)
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum email address length
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Contact form message length bounds
pub const MIN_CONTACT_MESSAGE_LENGTH: usize = 10;
pub const MAX_CONTACT_MESSAGE_LENGTH: usize = 2000;

/// Profile message length bounds
pub const MIN_PROFILE_MESSAGE_LENGTH: usize = 5;
pub const MAX_PROFILE_MESSAGE_LENGTH: usize = 2000;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

// =============================================================================
// FIELD PATTERNS
// =============================================================================

/// Phone number digits without country code
pub const PHONE_DIGITS_PATTERN: &str = r"^[0-9]{7,15}$";

/// International dialing prefix, e.g. `+91`
pub const COUNTRY_CODE_PATTERN: &str = r"^\+[0-9]{1,4}$";

/// Free-form phone number as typed into the profile page
pub const FREE_FORM_PHONE_PATTERN: &str = r"^[+]?[0-9\s()-]{7,20}$";

/// Structural email check: local part, `@`, domain with at least one dot
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";

// =============================================================================
// ROLES
// =============================================================================

/// Visitor roles offered on the contact and sign-up forms
pub mod roles {
    pub const STUDENT: &str = "student";
    pub const PROFESSIONAL: &str = "professional";
    pub const CLIENT: &str = "client";

    /// All selectable roles
    pub const ALL: &[&str] = &[STUDENT, PROFESSIONAL, CLIENT];
}

// =============================================================================
// RATE LIMITS
// =============================================================================

/// Default rate limits, overridable through [`crate::config`]
pub mod rate_limits {
    /// Sign-in and sign-up attempts
    pub const AUTH_MAX_ATTEMPTS: u32 = 5;
    pub const AUTH_WINDOW_MS: u64 = 60_000;

    /// Contact form submissions
    pub const FORM_MAX_ATTEMPTS: u32 = 3;
    pub const FORM_WINDOW_MS: u64 = 60_000;

    /// Profile page messages
    pub const MESSAGE_MAX_ATTEMPTS: u32 = 5;
    pub const MESSAGE_WINDOW_MS: u64 = 300_000;
}

/// Bucket names used by the site forms
pub mod rate_limit_keys {
    pub const AUTH: &str = "auth";
    pub const CONTACT_FORM: &str = "contact-form";
    pub const PROFILE_MESSAGE: &str = "profile-message";
}

/// What a denial says was throttled ("Too many {subject}. ...")
pub mod throttle_subjects {
    pub const ATTEMPTS: &str = "attempts";
    pub const MESSAGES: &str = "messages";
}

// =============================================================================
// IDENTITY PROVIDER ERROR CODES
// =============================================================================

/// Error identifiers reported by the hosted identity provider
pub mod auth_codes {
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
    pub const POPUP_CLOSED_BY_USER: &str = "auth/popup-closed-by-user";
    pub const ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL: &str =
        "auth/account-exists-with-different-credential";
}

// =============================================================================
// SUBMISSIONS
// =============================================================================

/// Source tag attached to contact page submissions
pub const CONTACT_SOURCE: &str = "contact_page";

/// Status given to newly stored profile messages
pub const NEW_MESSAGE_STATUS: &str = "new";

// =============================================================================
// PAYMENTS
// =============================================================================

/// Currency used by the checkout dialog
pub const DEFAULT_CURRENCY: &str = "USD";

// =============================================================================
// LOGGING
// =============================================================================

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
