//! Compact rendering of time deltas for display.

use time::OffsetDateTime;

/// Render the signed delta from `from` to `to`.
///
/// Positive when `to` is later than `from`. Deltas of a day or more render
/// as `DDd HHh`, shorter ones as `HHh MMm`, fields zero-padded to two
/// digits and a leading `-` on negative deltas. Seconds are discarded; when
/// sub-minute precision matters for a reset it is already too late.
#[must_use]
pub fn format_delta(from: OffsetDateTime, to: OffsetDateTime) -> String {
    let delta = to - from;
    let sign = if delta.is_negative() { "-" } else { "" };
    let magnitude = delta.abs();
    let days = magnitude.whole_days();
    let hours = magnitude.whole_hours() % 24;
    let minutes = magnitude.whole_minutes() % 60;
    if days > 0 {
        format!("{sign}{days:02}d {hours:02}h")
    } else {
        format!("{sign}{hours:02}h {minutes:02}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::datetime;

    const BASE: OffsetDateTime = datetime!(2026-08-03 12:00 UTC);

    #[test]
    fn ninety_minutes() {
        assert_eq!(format_delta(BASE, BASE + Duration::minutes(90)), "01h 30m");
    }

    #[test]
    fn negative_ninety_minutes() {
        assert_eq!(format_delta(BASE, BASE - Duration::minutes(90)), "-01h 30m");
    }

    #[test]
    fn twenty_five_hours() {
        assert_eq!(format_delta(BASE, BASE + Duration::hours(25)), "01d 01h");
    }

    #[test]
    fn exactly_one_day() {
        assert_eq!(format_delta(BASE, BASE + Duration::days(1)), "01d 00h");
    }

    #[test]
    fn zero_delta() {
        assert_eq!(format_delta(BASE, BASE), "00h 00m");
    }

    #[test]
    fn seconds_are_discarded() {
        assert_eq!(format_delta(BASE, BASE + Duration::seconds(61)), "00h 01m");
        assert_eq!(format_delta(BASE, BASE + Duration::seconds(59)), "00h 00m");
    }

    #[test]
    fn sign_tracks_ordering() {
        let later = BASE + Duration::hours(3);
        assert!(!format_delta(BASE, later).starts_with('-'));
        assert!(format_delta(later, BASE).starts_with('-'));
    }
}
