//! Weekly time primitives — `WeekInstant`, `Interval`, and the "now" provider.
//!
//! Upstream payloads are untrusted: every field is optional and ill-typed
//! values collapse to `0` instead of failing deserialization.

use chrono::{Datelike, Local, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Day names indexed by day-of-week (0 = Sunday).
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full name for a day index, `"Unknown"` when outside `0..=6`.
pub fn day_name(day: i64) -> &'static str {
    usize::try_from(day)
        .ok()
        .and_then(|i| DAY_NAMES.get(i))
        .copied()
        .unwrap_or("Unknown")
}

// =============================================================================
// WeekInstant
// =============================================================================

/// A point inside the recurring 7-day cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekInstant {
    #[serde(default, deserialize_with = "lenient_int")]
    pub day: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub hour: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub minute: i64,
}

impl WeekInstant {
    pub const fn new(day: i64, hour: i64, minute: i64) -> Self {
        Self { day, hour, minute }
    }

    /// Minutes since Sunday 00:00.
    ///
    /// Saturates instead of overflowing, so out-of-range upstream values
    /// land past either end of the week and never match a real instant.
    pub const fn week_minutes(&self) -> i64 {
        self.day
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add(self.hour.saturating_mul(60))
            .saturating_add(self.minute)
    }
}

// =============================================================================
// Interval
// =============================================================================

/// One recurring opening window, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    #[serde(default, deserialize_with = "lenient_instant")]
    pub start: WeekInstant,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub end: WeekInstant,
}

impl Interval {
    pub const fn new(start: WeekInstant, end: WeekInstant) -> Self {
        Self { start, end }
    }

    /// Whether `now` falls inside this window. Degenerate windows
    /// (`start >= end`) never match.
    pub const fn contains(&self, now: WeekInstant) -> bool {
        let current = now.week_minutes();
        self.start.week_minutes() <= current && current < self.end.week_minutes()
    }
}

/// Parse a schedule from an arbitrary JSON value.
///
/// Non-arrays yield an empty schedule; malformed entries become the
/// all-zero interval so the entry still counts towards the day grouping.
pub fn schedule_from_value(value: &Value) -> Vec<Interval> {
    value
        .as_array()
        .map(|slots| {
            slots
                .iter()
                .map(|slot| Interval::deserialize(slot).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn lenient_schedule<'de, D>(deserializer: D) -> Result<Vec<Interval>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(schedule_from_value(&value))
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0))
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<WeekInstant, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(WeekInstant::deserialize(&value).unwrap_or_default())
}

// =============================================================================
// Clock
// =============================================================================

/// Source of "now" for open/closed decisions.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> WeekInstant;
}

/// Host wall clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> WeekInstant {
        let now = Local::now();
        WeekInstant::new(
            i64::from(now.weekday().num_days_from_sunday()),
            i64::from(now.hour()),
            i64::from(now.minute()),
        )
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub WeekInstant);

impl Clock for FixedClock {
    fn now(&self) -> WeekInstant {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_week_minutes_bounds() {
        assert_eq!(WeekInstant::new(0, 0, 0).week_minutes(), 0);
        assert_eq!(WeekInstant::new(6, 23, 59).week_minutes(), 10079);
        assert_eq!(WeekInstant::new(1, 7, 30).week_minutes(), 1440 + 450);
    }

    #[test]
    fn test_week_minutes_saturates() {
        assert_eq!(WeekInstant::new(i64::MAX, 0, 0).week_minutes(), i64::MAX);
        assert_eq!(WeekInstant::new(0, i64::MAX, i64::MAX).week_minutes(), i64::MAX);
        assert_eq!(WeekInstant::new(i64::MIN, 0, 0).week_minutes(), i64::MIN);
        assert_eq!(WeekInstant::new(1, 0, i64::MIN).week_minutes(), i64::MIN + 1440);
    }

    #[test]
    fn test_huge_float_fields_clamp() {
        let instant: WeekInstant =
            serde_json::from_value(json!({"day": 1e300, "hour": 3, "minute": -1e300})).unwrap();
        assert_eq!(instant, WeekInstant::new(i64::MAX, 3, i64::MIN));
        assert_eq!(instant.week_minutes(), -1);
    }

    #[test]
    fn test_day_name_out_of_range() {
        assert_eq!(day_name(0), "Sunday");
        assert_eq!(day_name(6), "Saturday");
        assert_eq!(day_name(7), "Unknown");
        assert_eq!(day_name(-1), "Unknown");
    }

    #[test]
    fn test_interval_missing_fields_default_to_zero() {
        let interval: Interval =
            serde_json::from_value(json!({"start": {"day": 2}, "end": {}})).unwrap();
        assert_eq!(interval.start, WeekInstant::new(2, 0, 0));
        assert_eq!(interval.end, WeekInstant::default());
    }

    #[test]
    fn test_interval_ill_typed_fields_default_to_zero() {
        let interval: Interval = serde_json::from_value(json!({
            "start": {"day": "monday", "hour": 7, "minute": null},
            "end": "whenever",
        }))
        .unwrap();
        assert_eq!(interval.start, WeekInstant::new(0, 7, 0));
        assert_eq!(interval.end, WeekInstant::default());
    }

    #[test]
    fn test_schedule_from_non_array() {
        assert!(schedule_from_value(&json!({"times": []})).is_empty());
        assert!(schedule_from_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_schedule_from_value_keeps_malformed_entries() {
        let schedule = schedule_from_value(&json!([
            {"start": {"day": 1, "hour": 7}, "end": {"day": 1, "hour": 21}},
            42,
        ]));
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[1], Interval::default());
    }

    #[test]
    fn test_degenerate_interval_never_matches() {
        let interval = Interval::new(WeekInstant::new(3, 10, 0), WeekInstant::new(3, 9, 0));
        assert!(!interval.contains(WeekInstant::new(3, 9, 30)));
        assert!(!interval.contains(WeekInstant::new(3, 10, 0)));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(WeekInstant::new(4, 12, 30));
        assert_eq!(clock.now(), WeekInstant::new(4, 12, 30));
    }

    #[test]
    fn test_local_clock_in_range() {
        let now = LocalClock.now();
        assert!((0..=6).contains(&now.day));
        assert!((0..=23).contains(&now.hour));
        assert!((0..=59).contains(&now.minute));
    }
}
