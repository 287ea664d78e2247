//! Elapsed-time helpers for attendance display.

use chrono::{DateTime, Duration, Utc};

/// Time elapsed from `start` to `now`; clock skew never yields a negative value.
pub fn elapsed_since(start: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - start).max(Duration::zero())
}

/// Formats a duration as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped at 24. Negative durations format as `00:00:00`.
///
/// # Example
///
/// ```
/// use hr_engine::attendance::format_hms;
/// use chrono::Duration;
///
/// assert_eq!(format_hms(Duration::seconds(3 * 3600 + 5 * 60 + 9)), "03:05:09");
/// assert_eq!(format_hms(Duration::hours(26)), "26:00:00");
/// assert_eq!(format_hms(Duration::seconds(-30)), "00:00:00");
/// ```
pub fn format_hms(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_elapsed_since_clamps_skew() {
        let start = at("2026-01-15T09:00:00Z");
        assert_eq!(
            elapsed_since(start, at("2026-01-15T08:00:00Z")),
            Duration::zero()
        );
        assert_eq!(
            elapsed_since(start, at("2026-01-15T10:30:00Z")),
            Duration::minutes(90)
        );
    }

    #[test]
    fn test_format_drops_subsecond_part() {
        assert_eq!(format_hms(Duration::milliseconds(59_999)), "00:00:59");
    }
}
