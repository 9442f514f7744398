//! Reset-window arithmetic.
//!
//! Everything here computes in a single fixed UTC-equivalent calendar: day
//! boundaries zero out the time of day, week boundaries are Monday-aligned,
//! and there is no timezone or DST adjustment.

use crate::recur::{Interval, Recurrence};
use time::{Duration, OffsetDateTime, Time};

/// 00:00:00.0 on the same calendar day as `t`.
const fn floor_to_day(t: OffsetDateTime) -> OffsetDateTime {
    t.replace_time(Time::MIDNIGHT)
}

/// 00:00:00.0 on the Monday on or before `t`'s calendar day.
///
/// `number_days_from_monday` counts Sunday as six days after Monday, so a
/// Sunday floors back to the Monday of the week that is ending, not forward.
fn floor_to_week(t: OffsetDateTime) -> OffsetDateTime {
    let into_week = i64::from(t.weekday().number_days_from_monday());
    floor_to_day(t - Duration::days(into_week))
}

fn reset_in_current_interval(reset: &Recurrence, t: OffsetDateTime) -> OffsetDateTime {
    let start = match reset.interval {
        Interval::Daily => floor_to_day(t),
        Interval::Weekly => floor_to_week(t),
    };
    start + Duration::hours(i64::from(reset.hour_offset))
}

/// Next reset instant after `now`.
///
/// The reset within the current interval sits `hour_offset` hours past the
/// interval start. If `now` has not reached it yet, that is the answer;
/// otherwise the same point one interval later is. The comparison is strict,
/// so at the exact reset instant the reset counts as having just occurred
/// and the result is a full interval ahead.
#[must_use]
pub fn next_reset(reset: &Recurrence, now: OffsetDateTime) -> OffsetDateTime {
    let candidate = reset_in_current_interval(reset, now);
    if now < candidate {
        candidate
    } else {
        candidate + Duration::days(reset.interval.days())
    }
}

/// Most recent reset instant at or before `now`.
///
/// Mirror of [`next_reset`], searching backward with the symmetric boundary
/// convention: at the exact reset instant `now` itself is the answer, so the
/// two functions never return the same instant for the same `now`.
#[must_use]
pub fn prev_reset(reset: &Recurrence, now: OffsetDateTime) -> OffsetDateTime {
    let candidate = reset_in_current_interval(reset, now);
    if now > candidate {
        candidate
    } else {
        candidate - Duration::days(reset.interval.days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn daily(hour_offset: u32) -> Recurrence {
        Recurrence {
            name: "daily test".into(),
            interval: Interval::Daily,
            hour_offset,
        }
    }

    fn weekly(hour_offset: u32) -> Recurrence {
        Recurrence {
            name: "weekly test".into(),
            interval: Interval::Weekly,
            hour_offset,
        }
    }

    // 2026-08-03 is a Monday.

    #[test]
    fn daily_next_reset_before_the_offset_hour() {
        let now = datetime!(2026-08-03 10:00 UTC);
        assert_eq!(next_reset(&daily(15), now), datetime!(2026-08-03 15:00 UTC));
    }

    #[test]
    fn daily_next_reset_after_the_offset_hour() {
        let now = datetime!(2026-08-03 16:00 UTC);
        assert_eq!(next_reset(&daily(15), now), datetime!(2026-08-04 15:00 UTC));
    }

    #[test]
    fn daily_prev_reset_mirrors_next() {
        let now = datetime!(2026-08-03 16:00 UTC);
        assert_eq!(prev_reset(&daily(15), now), datetime!(2026-08-03 15:00 UTC));
        let now = datetime!(2026-08-03 10:00 UTC);
        assert_eq!(prev_reset(&daily(15), now), datetime!(2026-08-02 15:00 UTC));
    }

    #[test]
    fn weekly_offset_crosses_into_tuesday() {
        // 32 hours past Monday 00:00 is Tuesday 08:00.
        let now = datetime!(2026-08-03 0:00 UTC);
        assert_eq!(next_reset(&weekly(32), now), datetime!(2026-08-04 8:00 UTC));
    }

    #[test]
    fn weekly_floor_treats_sunday_as_end_of_week() {
        let sunday = datetime!(2026-08-09 23:00 UTC);
        assert_eq!(next_reset(&weekly(0), sunday), datetime!(2026-08-10 0:00 UTC));
        assert_eq!(prev_reset(&weekly(0), sunday), datetime!(2026-08-03 0:00 UTC));
    }

    #[test]
    fn weekly_offset_spanning_five_days() {
        // 139 hours past Monday 00:00 is Saturday 19:00.
        let wednesday = datetime!(2026-08-05 12:00 UTC);
        assert_eq!(
            next_reset(&weekly(139), wednesday),
            datetime!(2026-08-08 19:00 UTC)
        );
        assert_eq!(
            prev_reset(&weekly(139), wednesday),
            datetime!(2026-08-01 19:00 UTC)
        );
    }

    #[test]
    fn daily_offset_beyond_interval_length() {
        // 32 hours past a daily interval start lands in the following day.
        let now = datetime!(2026-08-03 10:00 UTC);
        assert_eq!(next_reset(&daily(32), now), datetime!(2026-08-04 8:00 UTC));
        assert_eq!(prev_reset(&daily(32), now), datetime!(2026-08-03 8:00 UTC));
    }

    #[test]
    fn boundary_instant_counts_as_just_reset() {
        let at = datetime!(2026-08-03 15:00 UTC);
        assert_eq!(prev_reset(&daily(15), at), at);
        assert_eq!(next_reset(&daily(15), at), datetime!(2026-08-04 15:00 UTC));
    }

    #[test]
    fn next_is_strictly_after_and_prev_at_or_before() {
        let reset = daily(15);
        let start = datetime!(2026-08-02 0:00 UTC);
        for hour in 0..48 {
            let now = start + Duration::hours(hour);
            assert!(next_reset(&reset, now) > now, "next must be in the future at {now}");
            assert!(prev_reset(&reset, now) <= now, "prev must not be in the future at {now}");
            assert_ne!(
                next_reset(&reset, now),
                prev_reset(&reset, now),
                "next and prev must never coincide at {now}"
            );
        }
    }

    #[test]
    fn next_of_prev_advances_exactly_one_interval() {
        for reset in [daily(15), weekly(32), weekly(139)] {
            let now = datetime!(2026-08-05 12:00 UTC);
            let prev = prev_reset(&reset, now);
            assert_eq!(
                next_reset(&reset, prev),
                prev + Duration::days(reset.interval.days())
            );
        }
    }

    #[test]
    fn month_rollover_carries_correctly() {
        // Daily reset at 20:00 queried late on the last day of the month.
        let now = datetime!(2026-08-31 21:00 UTC);
        assert_eq!(next_reset(&daily(20), now), datetime!(2026-09-01 20:00 UTC));
    }
}
