//! Time utilities

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a wait time in milliseconds for display.
///
/// Under a minute the value is shown in whole seconds, otherwise in whole
/// minutes. Both are rounded up, so 65 seconds reads as "2 minutes".
pub fn format_remaining_time(ms: u64) -> String {
    let seconds = ms.div_ceil(1000);
    if seconds < 60 {
        return format!("{} {}", seconds, plural(seconds, "second"));
    }
    let minutes = seconds.div_ceil(60);
    format!("{} {}", minutes, plural(minutes, "minute"))
}

/// Same as [`format_remaining_time`] for a `Duration`
pub fn format_remaining(duration: Duration) -> String {
    format_remaining_time(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_remaining_time(5000), "5 seconds");
        assert_eq!(format_remaining_time(1000), "1 second");
        assert_eq!(format_remaining_time(1), "1 second");
        assert_eq!(format_remaining_time(4200), "5 seconds");
        assert_eq!(format_remaining_time(59_000), "59 seconds");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_remaining_time(65_000), "2 minutes");
        assert_eq!(format_remaining_time(60_000), "1 minute");
        assert_eq!(format_remaining_time(59_001), "1 minute");
        assert_eq!(format_remaining_time(300_000), "5 minutes");
    }

    #[test]
    fn test_format_zero_is_plural() {
        assert_eq!(format_remaining_time(0), "0 seconds");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_remaining(Duration::from_millis(999)), "1 second");
        assert_eq!(format_remaining(Duration::from_secs(120)), "2 minutes");
    }
}
