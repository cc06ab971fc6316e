//! Form submission flows
//!
//! Glue between page code and the validation, rate limit and auth-error
//! layers. Each flow returns the payload the page hands to its backend;
//! the network call itself belongs to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::auth_errors::get_auth_error_message;
use crate::config::{Config, RateLimitSettings};
use crate::constants::{CONTACT_SOURCE, NEW_MESSAGE_STATUS, rate_limit_keys, throttle_subjects};
use crate::error::{AppError, AppResult};
use crate::logging::MaskedEmail;
use crate::rate_limit::{Clock, RateLimitConfig, RateLimitDecision, RateLimiter, SystemClock};
use crate::utils::time::now_utc;
use crate::validation::{
    CONTACT_FORM_SCHEMA, CREDENTIAL_SCHEMA, ContactForm, Credentials, PROFILE_MESSAGE_SCHEMA,
    PROFILE_UPDATE_SCHEMA, ProfileMessage, ProfileUpdate, UserRole, validate_form,
};

/// Body posted to the contact webhook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Country code and number joined by a space, e.g. `+91 9876543210`
    pub phone: String,
    pub message: String,
    pub source: &'static str,
}

impl From<ContactForm> for ContactSubmission {
    fn from(form: ContactForm) -> Self {
        Self {
            phone: format!("{} {}", form.country_code, form.phone).trim().to_string(),
            name: form.name,
            email: form.email,
            role: form.role,
            message: form.message,
            source: CONTACT_SOURCE,
        }
    }
}

/// Document stored for a message sent from the profile page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMessageRecord {
    pub user_id: String,
    pub user_email: Option<String>,
    pub content: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

/// Profile fields as written back to the user document.
///
/// Cleared or absent fields are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChanges {
    pub mobile: String,
    pub alt_email: String,
}

impl From<ProfileUpdate> for ProfileChanges {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            mobile: update.mobile.unwrap_or_default(),
            alt_email: update.alt_email.unwrap_or_default(),
        }
    }
}

/// Validation plus throttling for the site forms.
///
/// The limiter is injected so one instance can be shared by every form on
/// a page while tests build their own.
pub struct FormGuard<C: Clock = SystemClock> {
    limiter: RateLimiter<C>,
    limits: RateLimitSettings,
}

impl FormGuard<SystemClock> {
    /// Guard with its own limiter and the limits from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(RateLimiter::new(), config.rate_limits)
    }
}

impl<C: Clock> FormGuard<C> {
    pub fn new(limiter: RateLimiter<C>, limits: RateLimitSettings) -> Self {
        Self { limiter, limits }
    }

    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    /// Validate a contact form, then count it against the form limit.
    pub fn submit_contact(&self, input: &Value) -> AppResult<ContactSubmission> {
        let form: ContactForm = validate_form(&CONTACT_FORM_SCHEMA, input)?;
        self.throttle(
            rate_limit_keys::CONTACT_FORM,
            &self.limits.form,
            throttle_subjects::ATTEMPTS,
        )?;

        tracing::info!(
            email = %MaskedEmail::new(&form.email),
            role = %form.role,
            "Contact form accepted"
        );
        Ok(form.into())
    }

    /// Validate sign-in or sign-up credentials, then count the attempt.
    pub fn authenticate(&self, input: &Value) -> AppResult<Credentials> {
        let credentials: Credentials = validate_form(&CREDENTIAL_SCHEMA, input)?;
        self.throttle(rate_limit_keys::AUTH, &self.limits.auth, throttle_subjects::ATTEMPTS)?;
        Ok(credentials)
    }

    /// Message from a signed-in visitor.
    ///
    /// The limit is checked before validation, so rejected drafts still
    /// count as attempts.
    pub fn send_profile_message(
        &self,
        user_id: &str,
        user_email: Option<&str>,
        input: &Value,
    ) -> AppResult<ProfileMessageRecord> {
        self.throttle(
            rate_limit_keys::PROFILE_MESSAGE,
            &self.limits.message,
            throttle_subjects::MESSAGES,
        )?;
        let draft: ProfileMessage = validate_form(&PROFILE_MESSAGE_SCHEMA, input)?;

        Ok(ProfileMessageRecord {
            user_id: user_id.to_string(),
            user_email: user_email.map(str::to_string),
            content: draft.message,
            status: NEW_MESSAGE_STATUS,
            created_at: now_utc(),
        })
    }

    /// Profile contact details. Not rate limited.
    pub fn update_profile(&self, input: &Value) -> AppResult<ProfileChanges> {
        let update: ProfileUpdate = validate_form(&PROFILE_UPDATE_SCHEMA, input)?;
        Ok(update.into())
    }

    /// Safe text for an identity provider failure
    pub fn auth_failure_message(&self, raw: Option<&Value>) -> &'static str {
        get_auth_error_message(raw)
    }

    fn throttle(
        &self,
        key: &str,
        config: &RateLimitConfig,
        subject: &'static str,
    ) -> AppResult<()> {
        match self.limiter.check(key, config) {
            RateLimitDecision::Allowed => Ok(()),
            denied @ RateLimitDecision::Denied { .. } => Err(AppError::RateLimited {
                subject,
                retry_after_ms: denied.remaining_ms().unwrap_or_else(|| config.window_ms()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::ManualClock;
    use serde_json::json;
    use std::time::Duration;

    fn guard() -> (FormGuard<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let guard = FormGuard::new(
            RateLimiter::with_clock(clock.clone()),
            RateLimitSettings::default(),
        );
        (guard, clock)
    }

    fn contact() -> Value {
        json!({
            "name": "Meera Iyer",
            "email": "meera@example.com",
            "phone": "9876543210",
            "countryCode": "+91",
            "role": "client",
            "message": "Please call me about recruitment services."
        })
    }

    #[test]
    fn test_contact_submission_payload() {
        let (guard, _) = guard();
        let submission = guard.submit_contact(&contact()).unwrap();
        assert_eq!(submission.phone, "+91 9876543210");
        assert_eq!(submission.source, "contact_page");

        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["role"], "client");
        assert_eq!(body["source"], "contact_page");
    }

    #[test]
    fn test_contact_invalid_does_not_count() {
        let (guard, _) = guard();
        for _ in 0..10 {
            let err = guard.submit_contact(&json!({})).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(guard.limiter().attempts(rate_limit_keys::CONTACT_FORM), 0);
    }

    #[test]
    fn test_contact_rate_limited() {
        let (guard, clock) = guard();
        for _ in 0..3 {
            guard.submit_contact(&contact()).unwrap();
        }
        clock.advance(Duration::from_secs(5));

        let err = guard.submit_contact(&contact()).unwrap_err();
        assert!(matches!(
            err,
            AppError::RateLimited {
                retry_after_ms: 55_000,
                ..
            }
        ));
        assert_eq!(err.user_message(), "Too many attempts. Please wait 55 seconds.");
    }

    #[test]
    fn test_profile_message_counts_before_validation() {
        let (guard, _) = guard();
        for _ in 0..5 {
            let err = guard
                .send_profile_message("uid-1", Some("a@b.co"), &json!({ "message": "hi" }))
                .unwrap_err();
            assert_eq!(err.user_message(), "Message must be at least 5 characters");
        }

        let err = guard
            .send_profile_message("uid-1", Some("a@b.co"), &json!({ "message": "hello team" }))
            .unwrap_err();
        assert_eq!(err.user_message(), "Too many messages. Please wait 5 minutes.");
    }

    #[test]
    fn test_profile_message_record() {
        let (guard, _) = guard();
        let record = guard
            .send_profile_message("uid-1", None, &json!({ "message": "  need help  " }))
            .unwrap();
        assert_eq!(record.content, "need help");
        assert_eq!(record.status, "new");

        let body = serde_json::to_value(&record).unwrap();
        assert_eq!(body["userId"], "uid-1");
        assert!(body["userEmail"].is_null());
        assert!(body.get("createdAt").is_some());
    }

    #[test]
    fn test_update_profile_normalizes_empty_fields() {
        let (guard, _) = guard();
        let changes = guard.update_profile(&json!({ "mobile": "+44 20 7946 0958" })).unwrap();
        assert_eq!(
            changes,
            ProfileChanges {
                mobile: "+44 20 7946 0958".to_string(),
                alt_email: String::new(),
            }
        );
    }

    #[test]
    fn test_authenticate_limit_and_reset() {
        let (guard, _) = guard();
        let input = json!({ "email": "a@b.co", "password": "secret1" });
        for _ in 0..5 {
            guard.authenticate(&input).unwrap();
        }
        assert!(matches!(
            guard.authenticate(&input),
            Err(AppError::RateLimited { .. })
        ));

        guard.limiter().reset(rate_limit_keys::AUTH);
        assert!(guard.authenticate(&input).is_ok());
    }

    #[test]
    fn test_from_config_uses_configured_limits() {
        let config = Config::from_lookup(|key| {
            (key == "FORM_RATE_LIMIT_MAX").then(|| "1".to_string())
        })
        .unwrap();
        let guard = FormGuard::from_config(&config);

        guard.submit_contact(&contact()).unwrap();
        let err = guard.submit_contact(&contact()).unwrap_err();
        assert!(err.user_message().starts_with("Too many attempts. Please wait"));
    }

    #[test]
    fn test_auth_failure_message() {
        let (guard, _) = guard();
        assert_eq!(
            guard.auth_failure_message(Some(&json!({ "code": "auth/user-not-found" }))),
            "Invalid email or password. Please try again."
        );
    }
}
