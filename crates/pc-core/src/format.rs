//! Human-readable renderings of durations.

use chrono::Duration;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Formats a duration as hours and minutes.
///
/// The full form is `"{H}h {MM}m"` with zero-padded minutes. The short form
/// drops zero components (`"2h"`, `"45m"`) and is `"0m"` when both are zero.
/// Negative durations are treated as zero. Seconds are truncated.
pub fn format_duration(duration: Duration, short: bool) -> String {
    let total_minutes = duration.max(Duration::zero()).num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if !short {
        return format!("{hours}h {minutes:02}m");
    }
    match (hours, minutes) {
        (0, 0) => "0m".to_string(),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Converts a duration to fractional hours for charting.
#[allow(clippy::cast_precision_loss)]
pub fn format_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Formats a running timer as `HH:MM:SS`. Negative durations show as zero.
pub fn format_elapsed(duration: Duration) -> String {
    let seconds = duration.max(Duration::zero()).num_seconds();
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_form_pads_minutes() {
        assert_eq!(format_duration(Duration::minutes(65), false), "1h 05m");
        assert_eq!(format_duration(Duration::hours(10), false), "10h 00m");
    }

    #[test]
    fn negative_and_zero_render_the_same() {
        assert_eq!(format_duration(Duration::milliseconds(-5), false), "0h 00m");
        assert_eq!(format_duration(Duration::zero(), false), "0h 00m");
    }

    #[test]
    fn short_form_omits_zero_parts() {
        assert_eq!(format_duration(Duration::minutes(90), true), "1h 30m");
        assert_eq!(format_duration(Duration::zero(), true), "0m");
        assert_eq!(format_duration(Duration::hours(2), true), "2h");
        assert_eq!(format_duration(Duration::minutes(45), true), "45m");
        assert_eq!(format_duration(Duration::seconds(59), true), "0m");
    }

    #[test]
    fn seconds_are_truncated() {
        assert_eq!(format_duration(Duration::seconds(119), false), "0h 01m");
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact values are representable in binary"
    )]
    fn hours_are_plain_division() {
        assert_eq!(format_hours(Duration::minutes(90)), 1.5);
        assert_eq!(format_hours(Duration::zero()), 0.0);
        assert_eq!(format_hours(Duration::hours(-2)), -2.0);
    }

    #[test]
    fn elapsed_timer_format() {
        assert_eq!(format_elapsed(Duration::seconds(3 * 3600 + 7 * 60 + 9)), "03:07:09");
        assert_eq!(format_elapsed(Duration::seconds(-10)), "00:00:00");
        assert_eq!(format_elapsed(Duration::hours(26)), "26:00:00");
    }
}
