//! Typed views of validated form data

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::roles;
use crate::error::AppError;

/// Visitor role picked on the contact and sign-up forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Professional,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => roles::STUDENT,
            UserRole::Professional => roles::PROFESSIONAL,
            UserRole::Client => roles::CLIENT,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            roles::STUDENT => Ok(UserRole::Student),
            roles::PROFESSIONAL => Ok(UserRole::Professional),
            roles::CLIENT => Ok(UserRole::Client),
            _ => Err(AppError::InvalidInput("Please select a valid role".to_string())),
        }
    }
}

/// Contact page submission
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country_code: String,
    pub role: UserRole,
    pub message: String,
}

/// Email and password for sign-in or sign-up
#[derive(Clone, PartialEq, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Free-text message from a signed-in visitor
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileMessage {
    pub message: String,
}

/// Optional contact details on the profile page
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub alt_email: Option<String>,
}
