//! Property tests for dwell-time rendering.

use chrono::Duration;
use proptest::prelude::*;

use parkwatch_core::duration::{format_duration, DurationParts};

proptest! {
    #[test]
    fn prop_parts_recompose_whole_seconds(nanos in -1_000_000_000_000_000i64..1_000_000_000_000_000i64) {
        let d = Duration::nanoseconds(nanos);
        let parts = DurationParts::from_duration(d);
        prop_assert!(parts.minutes < 60);
        prop_assert!(parts.seconds < 60);
        prop_assert_eq!(
            parts.hours * 3600 + parts.minutes * 60 + parts.seconds,
            d.num_seconds().unsigned_abs()
        );
        prop_assert_eq!(parts.negative, d.num_seconds() < 0);
    }

    #[test]
    fn prop_format_shape(secs in 0i64..10_000_000) {
        let text = format_duration(Duration::seconds(secs));
        let expected = format!("{}h{}m{}s", secs / 3600, (secs % 3600) / 60, secs % 60);
        prop_assert_eq!(text, expected);
    }
}
