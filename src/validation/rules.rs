//! Field rules and the interpreter that applies them to untyped input.

use regex::Regex;
use serde_json::{Map, Value};

use crate::utils::validation::{char_len, is_valid_email};

use super::ValidationResult;

/// A single constraint attached to a form field.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// String whose length (in characters) must fall within `min..=max`.
    Length {
        min: usize,
        max: usize,
        trim: bool,
        too_short: String,
        too_long: String,
    },
    /// Trimmed email address no longer than `max` characters.
    Email {
        max: usize,
        invalid: String,
        too_long: String,
    },
    /// String that must fully match `regex`.
    Pattern {
        regex: Regex,
        trim: bool,
        message: String,
    },
    /// One of a fixed set of tokens. Missing values get the same message.
    OneOf {
        allowed: &'static [&'static str],
        message: String,
    },
    /// Absent or `""` passes untouched; anything else must satisfy the inner rule.
    Optional(Box<FieldRule>),
}

impl FieldRule {
    pub fn length(
        min: usize,
        max: usize,
        too_short: impl Into<String>,
        too_long: impl Into<String>,
    ) -> Self {
        Self::Length {
            min,
            max,
            trim: true,
            too_short: too_short.into(),
            too_long: too_long.into(),
        }
    }

    /// Length rule that keeps surrounding whitespace (passwords).
    pub fn untrimmed_length(
        min: usize,
        max: usize,
        too_short: impl Into<String>,
        too_long: impl Into<String>,
    ) -> Self {
        Self::Length {
            min,
            max,
            trim: false,
            too_short: too_short.into(),
            too_long: too_long.into(),
        }
    }

    pub fn email(max: usize, invalid: impl Into<String>, too_long: impl Into<String>) -> Self {
        Self::Email {
            max,
            invalid: invalid.into(),
            too_long: too_long.into(),
        }
    }

    pub fn pattern(regex: Regex, trim: bool, message: impl Into<String>) -> Self {
        Self::Pattern {
            regex,
            trim,
            message: message.into(),
        }
    }

    pub fn one_of(allowed: &'static [&'static str], message: impl Into<String>) -> Self {
        Self::OneOf {
            allowed,
            message: message.into(),
        }
    }

    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Check a present value, returning its normalized form.
    fn apply(&self, value: &Value, label: &str) -> Result<Value, String> {
        let Some(raw) = value.as_str() else {
            return Err(match self {
                Self::OneOf { message, .. } => message.clone(),
                Self::Optional(inner) => return inner.apply(value, label),
                _ => format!("{} must be text", label),
            });
        };

        match self {
            Self::Length {
                min,
                max,
                trim,
                too_short,
                too_long,
            } => {
                let text = if *trim { raw.trim() } else { raw };
                let len = char_len(text);
                if len < *min {
                    Err(too_short.clone())
                } else if len > *max {
                    Err(too_long.clone())
                } else {
                    Ok(Value::String(text.to_string()))
                }
            }
            Self::Email {
                max,
                invalid,
                too_long,
            } => {
                let text = raw.trim();
                if !is_valid_email(text) {
                    Err(invalid.clone())
                } else if char_len(text) > *max {
                    Err(too_long.clone())
                } else {
                    Ok(Value::String(text.to_string()))
                }
            }
            Self::Pattern {
                regex,
                trim,
                message,
            } => {
                let text = if *trim { raw.trim() } else { raw };
                if regex.is_match(text) {
                    Ok(Value::String(text.to_string()))
                } else {
                    Err(message.clone())
                }
            }
            Self::OneOf { allowed, message } => {
                if allowed.iter().any(|token| *token == raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(message.clone())
                }
            }
            Self::Optional(inner) => inner.apply(value, label),
        }
    }
}

/// A named field and its rule.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub rule: FieldRule,
}

impl Field {
    /// Evaluate the field against its raw value.
    ///
    /// `Ok(None)` means the field is optional, absent, and left out of the
    /// normalized output.
    fn evaluate(&self, value: Option<&Value>) -> Result<Option<Value>, String> {
        match (&self.rule, value) {
            (FieldRule::Optional(_), None) => Ok(None),
            (FieldRule::Optional(_), Some(Value::String(s))) if s.is_empty() => {
                Ok(Some(Value::String(String::new())))
            }
            (FieldRule::OneOf { message, .. }, None | Some(Value::Null)) => Err(message.clone()),
            (FieldRule::Optional(_), Some(v)) => self.rule.apply(v, &self.label).map(Some),
            (_, None | Some(Value::Null)) => Err(format!("{} is required", self.label)),
            (rule, Some(v)) => rule.apply(v, &self.label).map(Some),
        }
    }
}

/// An immutable, ordered set of field rules.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Errors are reported in the order fields are added.
    pub fn field(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        rule: FieldRule,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            label: label.into(),
            rule,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Validate an untyped record.
    ///
    /// Every field is checked; the result carries one message per failing
    /// field. Keys not declared by the schema are dropped from the output.
    /// Input that is not a JSON object is treated as an empty record.
    pub fn validate(&self, input: &Value) -> ValidationResult<Map<String, Value>> {
        let record = input.as_object();
        let mut data = Map::new();
        let mut errors = Vec::new();

        for field in &self.fields {
            let value = record.and_then(|r| r.get(&field.name));
            match field.evaluate(value) {
                Ok(Some(normalized)) => {
                    data.insert(field.name.clone(), normalized);
                }
                Ok(None) => {}
                Err(message) => errors.push(message),
            }
        }

        if errors.is_empty() {
            ValidationResult::Valid(data)
        } else {
            tracing::debug!(schema = %self.name, error_count = errors.len(), "Validation failed");
            ValidationResult::Invalid(errors)
        }
    }
}
