//! Utility functions

pub mod time;
pub mod validation;

pub use time::{format_remaining, format_remaining_time, now_utc};
pub use validation::{char_len, is_valid_email};
