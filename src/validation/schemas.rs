//! The four site form schemas.
//!
//! Schemas are built once on first use and shared read-only afterwards.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{
    COUNTRY_CODE_PATTERN, FREE_FORM_PHONE_PATTERN, MAX_CONTACT_MESSAGE_LENGTH, MAX_EMAIL_LENGTH,
    MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_PROFILE_MESSAGE_LENGTH, MIN_CONTACT_MESSAGE_LENGTH,
    MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_PROFILE_MESSAGE_LENGTH, PHONE_DIGITS_PATTERN,
    roles,
};

use super::rules::{FieldRule, Schema};

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("form patterns are valid regexes")
}

fn email_rule() -> FieldRule {
    FieldRule::email(
        MAX_EMAIL_LENGTH,
        "Please enter a valid email address",
        format!("Email must be less than {} characters", MAX_EMAIL_LENGTH),
    )
}

/// Contact page: name, email, phone, country code, role, message
pub static CONTACT_FORM_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("contact-form")
        .field(
            "name",
            "Name",
            FieldRule::length(
                MIN_NAME_LENGTH,
                MAX_NAME_LENGTH,
                format!("Name must be at least {} characters", MIN_NAME_LENGTH),
                format!("Name must be less than {} characters", MAX_NAME_LENGTH),
            ),
        )
        .field("email", "Email", email_rule())
        .field(
            "phone",
            "Phone number",
            FieldRule::pattern(
                compile(PHONE_DIGITS_PATTERN),
                true,
                "Phone number must be 7-15 digits",
            ),
        )
        .field(
            "countryCode",
            "Country code",
            FieldRule::pattern(compile(COUNTRY_CODE_PATTERN), false, "Invalid country code"),
        )
        .field(
            "role",
            "Role",
            FieldRule::one_of(roles::ALL, "Please select a valid role"),
        )
        .field(
            "message",
            "Message",
            FieldRule::length(
                MIN_CONTACT_MESSAGE_LENGTH,
                MAX_CONTACT_MESSAGE_LENGTH,
                format!("Message must be at least {} characters", MIN_CONTACT_MESSAGE_LENGTH),
                format!("Message must be less than {} characters", MAX_CONTACT_MESSAGE_LENGTH),
            ),
        )
});

/// Sign-in and sign-up: email and password
pub static CREDENTIAL_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("credential")
        .field("email", "Email", email_rule())
        .field(
            "password",
            "Password",
            FieldRule::untrimmed_length(
                MIN_PASSWORD_LENGTH,
                MAX_PASSWORD_LENGTH,
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
                format!("Password must be less than {} characters", MAX_PASSWORD_LENGTH),
            ),
        )
});

/// Message sent from the profile page
pub static PROFILE_MESSAGE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("profile-message").field(
        "message",
        "Message",
        FieldRule::length(
            MIN_PROFILE_MESSAGE_LENGTH,
            MAX_PROFILE_MESSAGE_LENGTH,
            format!("Message must be at least {} characters", MIN_PROFILE_MESSAGE_LENGTH),
            format!("Message must be less than {} characters", MAX_PROFILE_MESSAGE_LENGTH),
        ),
    )
});

/// Optional contact details edited on the profile page
pub static PROFILE_UPDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("profile-update")
        .field(
            "mobile",
            "Mobile number",
            FieldRule::pattern(
                compile(FREE_FORM_PHONE_PATTERN),
                true,
                "Please enter a valid phone number",
            )
            .optional(),
        )
        .field("altEmail", "Alternate email", email_rule().optional())
});
