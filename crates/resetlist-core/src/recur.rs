use serde::{Deserialize, Serialize};

/// Recurrence period of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Resets once per calendar day.
    Daily,
    /// Resets once per calendar week, Monday-aligned.
    Weekly,
}

impl Interval {
    /// Length of the interval in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
        }
    }

    /// String representation used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// A reset cadence: an interval plus hours past the interval start.
///
/// `hour_offset` may exceed the interval length to express "N days and H
/// hours into the interval"; 32 on a weekly cadence means Tuesday 08:00 of a
/// Monday-aligned week. No upper bound is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    /// Display label, also the catalog lookup key.
    pub name: String,
    /// Recurrence period.
    pub interval: Interval,
    /// Hours past the start of the interval at which the reset falls.
    pub hour_offset: u32,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn interval_serializes_lowercase() {
        let json = serde_json::to_string(&Interval::Weekly).expect("must serialize interval");
        assert_eq!(json, "\"weekly\"");
        let parsed: Interval = serde_json::from_str("\"daily\"").expect("must parse interval");
        assert_eq!(parsed, Interval::Daily);
    }

    #[test]
    fn interval_lengths() {
        assert_eq!(Interval::Daily.days(), 1);
        assert_eq!(Interval::Weekly.days(), 7);
    }
}
