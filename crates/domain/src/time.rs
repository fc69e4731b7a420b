//! Duration and timestamp display helpers.

use chrono::NaiveDateTime;

/// Format seconds-since-boot as `3d 4h 12m`, dropping leading zero units.
#[must_use]
pub fn format_uptime(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let t = seconds as u64;
        t
    } else {
        0
    };
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Parse a backend timestamp: ISO 8601 without offset, with or without
/// fractional seconds.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Render a timestamp as `30.08.2026 12:34:56`.
#[must_use]
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%d.%m.%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_uptime_with_and_without_days() {
        assert_eq!(format_uptime(93_784.5), "1d 2h 3m");
        assert_eq!(format_uptime(7_260.0), "2h 1m");
        assert_eq!(format_uptime(59.0), "0m");
        assert_eq!(format_uptime(0.0), "0m");
        assert_eq!(format_uptime(-5.0), "0m");
    }

    #[test]
    fn should_parse_timestamps_with_and_without_fraction() {
        assert!(parse_timestamp("2026-08-30T12:34:56.789012").is_some());
        assert!(parse_timestamp("2026-08-30T12:34:56").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn should_format_timestamp_for_display() {
        let ts = parse_timestamp("2026-08-30T12:34:56.789012").unwrap();
        assert_eq!(format_timestamp(ts), "30.08.2026 12:34:56");
    }
}
