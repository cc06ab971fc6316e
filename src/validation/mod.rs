//! Schema-driven form validation
//!
//! Each site form has a [`Schema`]: an ordered list of fields, each with one
//! [`FieldRule`]. Validation is all-or-nothing per call but reports every
//! failing field in a single pass.

pub mod forms;
pub mod rules;
pub mod schemas;

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

pub use forms::{ContactForm, Credentials, ProfileMessage, ProfileUpdate, UserRole};
pub use rules::{Field, FieldRule, Schema};
pub use schemas::{
    CONTACT_FORM_SCHEMA, CREDENTIAL_SCHEMA, PROFILE_MESSAGE_SCHEMA, PROFILE_UPDATE_SCHEMA,
};

/// Generic message used if normalized data cannot be mapped onto a form type
const UNEXPECTED_SHAPE_MESSAGE: &str = "Please check the form and try again.";

/// Outcome of validating one record
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T> {
    /// All fields passed; holds the normalized values
    Valid(T),
    /// One message per failing field, in schema order
    Invalid(Vec<String>),
}

impl<T> ValidationResult<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Valid(data) => Some(data),
            Self::Invalid(_) => None,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationResult<U> {
        match self {
            Self::Valid(data) => ValidationResult::Valid(f(data)),
            Self::Invalid(errors) => ValidationResult::Invalid(errors),
        }
    }

    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self {
            Self::Valid(data) => Ok(data),
            Self::Invalid(errors) => Err(errors),
        }
    }

    /// Convert into an [`AppResult`], turning failures into `AppError::Validation`
    pub fn into_app_result(self) -> AppResult<T> {
        self.into_result().map_err(AppError::Validation)
    }
}

/// Validate `input` against `schema` and deserialize the normalized values into `T`.
pub fn validate<T: DeserializeOwned>(schema: &Schema, input: &Value) -> ValidationResult<T> {
    match schema.validate(input) {
        ValidationResult::Valid(data) => match serde_json::from_value(Value::Object(data)) {
            Ok(typed) => ValidationResult::Valid(typed),
            Err(e) => {
                tracing::error!(
                    schema = %schema.name(),
                    error = %e,
                    "Normalized form data did not match its type"
                );
                ValidationResult::Invalid(vec![UNEXPECTED_SHAPE_MESSAGE.to_string()])
            }
        },
        ValidationResult::Invalid(errors) => ValidationResult::Invalid(errors),
    }
}

/// Validate a form for a submission flow.
///
/// Field failures become `AppError::Validation`. Normalized data that does
/// not fit `T` means the schema and the form type disagree, which is an
/// internal error.
pub fn validate_form<T: DeserializeOwned>(schema: &Schema, input: &Value) -> AppResult<T> {
    let data = schema.validate(input).into_app_result()?;
    let typed = serde_json::from_value(Value::Object(data))
        .with_context(|| format!("Failed to map {} data onto its form type", schema.name()))?;
    Ok(typed)
}

/// The forms that have a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    ContactForm,
    Credential,
    ProfileMessage,
    ProfileUpdate,
}

impl SchemaName {
    pub const ALL: [SchemaName; 4] = [
        SchemaName::ContactForm,
        SchemaName::Credential,
        SchemaName::ProfileMessage,
        SchemaName::ProfileUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaName::ContactForm => "contact-form",
            SchemaName::Credential => "credential",
            SchemaName::ProfileMessage => "profile-message",
            SchemaName::ProfileUpdate => "profile-update",
        }
    }

    /// The shared, immutable schema for this form
    pub fn schema(&self) -> &'static Schema {
        match self {
            SchemaName::ContactForm => &CONTACT_FORM_SCHEMA,
            SchemaName::Credential => &CREDENTIAL_SCHEMA,
            SchemaName::ProfileMessage => &PROFILE_MESSAGE_SCHEMA,
            SchemaName::ProfileUpdate => &PROFILE_UPDATE_SCHEMA,
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| AppError::UnknownSchema(s.to_string()))
    }
}

/// Validate an untyped record against a schema looked up by name.
pub fn validate_named(
    name: &str,
    input: &Value,
) -> AppResult<ValidationResult<Map<String, Value>>> {
    let name: SchemaName = name.parse()?;
    Ok(name.schema().validate(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_name_round_trip() {
        for name in SchemaName::ALL {
            assert_eq!(name.as_str().parse::<SchemaName>().unwrap(), name);
            assert_eq!(name.schema().name(), name.as_str());
        }
    }

    #[test]
    fn test_validate_named_unknown_schema() {
        let err = validate_named("newsletter", &json!({})).unwrap_err();
        assert!(matches!(err, AppError::UnknownSchema(ref s) if s == "newsletter"));
    }

    #[test]
    fn test_validate_named_profile_message() {
        let result =
            validate_named("profile-message", &json!({ "message": "  hello there " })).unwrap();
        assert_eq!(result.data().unwrap().get("message"), Some(&json!("hello there")));
    }

    #[test]
    fn test_validate_form_field_errors() {
        let err = validate_form::<ProfileMessage>(&PROFILE_MESSAGE_SCHEMA, &json!({}))
            .unwrap_err();
        assert_eq!(err.validation_errors(), ["Message is required"]);
    }

    #[test]
    fn test_validate_form_type_mismatch_is_internal() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Mismatched {
            subject: String,
        }

        let err = validate_form::<Mismatched>(
            &PROFILE_MESSAGE_SCHEMA,
            &json!({ "message": "hello there" }),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(!err.user_message().contains("subject"));
    }

    #[test]
    fn test_into_app_result() {
        let result: ValidationResult<()> = ValidationResult::Invalid(vec!["bad".to_string()]);
        let err = result.into_app_result().unwrap_err();
        assert_eq!(err.validation_errors(), ["bad"]);
    }
}
