//! Human-readable rendering of dwell durations.
//!
//! Stored durations keep full precision; only the rendering truncates to
//! whole seconds.

use chrono::Duration;

/// Hour/minute/second breakdown of a duration's whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationParts {
    pub negative: bool,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationParts {
    /// Split `duration` into hours, minutes and seconds. Sub-second
    /// remainders are truncated toward zero.
    pub fn from_duration(duration: Duration) -> Self {
        let total = duration.num_seconds();
        let negative = total < 0;
        let abs = total.unsigned_abs();
        Self {
            negative,
            hours: abs / 3600,
            minutes: (abs % 3600) / 60,
            seconds: abs % 60,
        }
    }
}

impl std::fmt::Display for DurationParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}h{}m{}s", self.hours, self.minutes, self.seconds)
    }
}

/// Format a duration as `{h}h{m}m{s}s`.
pub fn format_duration(duration: Duration) -> String {
    DurationParts::from_duration(duration).to_string()
}

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Exact nanoseconds in `duration`. Unlike `Duration::num_nanoseconds` this
/// covers the whole `Duration` range.
pub fn total_nanos(duration: Duration) -> i128 {
    i128::from(duration.num_seconds()) * NANOS_PER_SEC + i128::from(duration.subsec_nanos())
}

/// Inverse of [`total_nanos`]; `None` outside the `Duration` range.
pub fn from_total_nanos(nanos: i128) -> Option<Duration> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok()?;
    let sub = nanos.rem_euclid(NANOS_PER_SEC) as i64;
    Duration::try_seconds(secs)?.checked_add(&Duration::nanoseconds(sub))
}

/// Duration in fractional seconds, for display and legacy document fields.
pub fn duration_seconds(duration: Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => duration.num_milliseconds() as f64 / 1e3,
    }
}

/// Serde adapter storing a `chrono::Duration` as whole nanoseconds (i128,
/// so durations of any length serialize).
pub mod serde_nanos {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{from_total_nanos, total_nanos};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i128(total_nanos(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let nanos = i128::deserialize(deserializer)?;
        from_total_nanos(nanos)
            .ok_or_else(|| serde::de::Error::custom("duration out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_hours() {
        assert_eq!(format_duration(Duration::hours(2)), "2h0m0s");
    }

    #[test]
    fn formats_mixed_components() {
        let d = Duration::hours(2) + Duration::minutes(30) + Duration::seconds(5);
        assert_eq!(format_duration(d), "2h30m5s");
    }

    #[test]
    fn truncates_subsecond_remainder() {
        let d = Duration::seconds(59) + Duration::milliseconds(999);
        assert_eq!(format_duration(d), "0h0m59s");
    }

    #[test]
    fn does_not_wrap_hours_into_days() {
        assert_eq!(format_duration(Duration::hours(49)), "49h0m0s");
    }

    #[test]
    fn negative_durations_keep_sign() {
        assert_eq!(format_duration(Duration::seconds(-61)), "-0h1m1s");
    }

    #[test]
    fn nanos_cover_centuries() {
        let d = Duration::days(365 * 600) + Duration::nanoseconds(7);
        assert!(d.num_nanoseconds().is_none());
        assert_eq!(from_total_nanos(total_nanos(d)), Some(d));
        assert_eq!(from_total_nanos(total_nanos(-d)), Some(-d));
        assert_eq!(from_total_nanos(i128::MAX), None);
    }

    #[test]
    fn serde_nanos_handles_long_durations() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Wrapper(#[serde(with = "serde_nanos")] Duration);

        let long = Wrapper(Duration::days(365 * 600));
        let json = serde_json::to_string(&long).unwrap();
        assert_eq!(json, "18921600000000000000");
        assert_eq!(serde_json::from_str::<Wrapper>(&json).unwrap(), long);

        let short = Wrapper(Duration::milliseconds(1500));
        assert_eq!(serde_json::to_string(&short).unwrap(), "1500000000");
    }

    #[test]
    fn seconds_are_fractional() {
        let d = Duration::milliseconds(1500);
        assert!((duration_seconds(d) - 1.5).abs() < f64::EPSILON);
    }
}
