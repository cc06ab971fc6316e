//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::EMAIL_PATTERN;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Structural email check: a non-empty local part, a single `@`, and a
/// domain with at least one dot and no empty labels.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Length in characters, as shown to the visitor
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
