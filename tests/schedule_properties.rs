//! Property tests for schedule evaluation and hours compaction.

use proptest::prelude::*;
use scotty_mcp::dining::{
    compact, detailed_hours, is_open, render_location_list, DiningLocation, Interval, WeekInstant,
    HOURS_NOT_AVAILABLE,
};
use serde_json::json;

fn instant() -> impl Strategy<Value = WeekInstant> {
    (0i64..7, 0i64..24, 0i64..60).prop_map(|(d, h, m)| WeekInstant::new(d, h, m))
}

fn interval() -> impl Strategy<Value = Interval> {
    (instant(), instant()).prop_map(|(start, end)| Interval::new(start, end))
}

/// Any field value at all, as a hostile upstream might send.
fn wild_instant() -> impl Strategy<Value = WeekInstant> {
    (any::<i64>(), any::<i64>(), any::<i64>()).prop_map(|(d, h, m)| WeekInstant::new(d, h, m))
}

/// A start instant and a strictly later end instant.
fn proper_interval() -> impl Strategy<Value = Interval> {
    interval().prop_filter("start must precede end", |i| {
        i.start.week_minutes() < i.end.week_minutes()
    })
}

proptest! {
    #[test]
    fn open_ignores_interval_order(
        schedule in prop::collection::vec(interval(), 0..12).prop_shuffle(),
        now in instant(),
    ) {
        let mut reversed = schedule.clone();
        reversed.reverse();
        prop_assert_eq!(is_open(now, &schedule), is_open(now, &reversed));
    }

    #[test]
    fn open_matches_any_containing_interval(
        schedule in prop::collection::vec(interval(), 0..12),
        now in instant(),
    ) {
        let t = now.week_minutes();
        let expected = schedule
            .iter()
            .any(|i| i.start.week_minutes() <= t && t < i.end.week_minutes());
        prop_assert_eq!(is_open(now, &schedule), expected);
    }

    #[test]
    fn intervals_are_half_open(i in proper_interval()) {
        prop_assert!(is_open(i.start, &[i]));
        prop_assert!(!is_open(i.end, &[i]));
    }

    #[test]
    fn degenerate_intervals_never_match(start in instant(), now in instant()) {
        prop_assert!(!is_open(now, &[Interval::new(start, start)]));
    }

    #[test]
    fn compact_has_one_group_per_time_range(
        schedule in prop::collection::vec(interval(), 1..20),
    ) {
        let summary = compact(&schedule);
        prop_assert_ne!(summary.as_str(), HOURS_NOT_AVAILABLE);

        let mut ranges: Vec<(i64, i64, i64, i64)> = schedule
            .iter()
            .map(|i| (i.start.hour, i.start.minute, i.end.hour, i.end.minute))
            .collect();
        ranges.sort();
        ranges.dedup();
        prop_assert_eq!(summary.split(" | ").count(), ranges.len());
    }

    #[test]
    fn out_of_range_fields_never_panic(
        schedule in prop::collection::vec(
            (wild_instant(), wild_instant()).prop_map(|(s, e)| Interval::new(s, e)),
            0..8,
        ),
        now in instant(),
    ) {
        let open = is_open(now, &schedule);
        let t = now.week_minutes();
        prop_assert_eq!(
            open,
            schedule.iter().any(|i| i.start.week_minutes() <= t && t < i.end.week_minutes())
        );
        let _ = compact(&schedule);
        prop_assert_eq!(detailed_hours(&schedule).len(), schedule.len());

        let location = DiningLocation {
            name: "Wild".to_string(),
            times: schedule,
            ..DiningLocation::default()
        };
        let listing = render_location_list(&[location], "All CMU Dining Locations", now);
        prop_assert!(listing.contains("Wild"));
    }
}

#[test]
fn test_empty_schedule() {
    assert!(!is_open(WeekInstant::new(1, 12, 0), &[]));
    assert_eq!(compact(&[]), HOURS_NOT_AVAILABLE);
}

#[test]
fn test_malformed_locations_never_fail() {
    let payloads = [
        json!(null),
        json!("The Exchange"),
        json!({}),
        json!({"name": 5, "times": "always"}),
        json!({"name": "Entropy+", "times": [null, {"start": "noon"}, {"end": {"day": "x"}}]}),
        json!({"name": "Schatz", "acceptsOnlineOrders": "yes", "todaysSpecials": [1, {"title": "Pho"}]}),
        json!({"name": "Huge", "times": [{"start": {"day": 1e300}, "end": {"day": 1, "hour": 21}}]}),
        json!({"name": "Extremes", "times": [
            {"start": {"day": i64::MAX, "hour": i64::MAX, "minute": i64::MAX}, "end": {"day": i64::MIN}},
            {"start": {"day": -1e300, "minute": -1e300}, "end": {"hour": u64::MAX, "minute": i64::MIN}},
        ]}),
    ];
    let now = WeekInstant::new(1, 12, 0);

    for payload in &payloads {
        let location = DiningLocation::from_value(payload);
        // Evaluating and rendering must not panic either.
        let _ = is_open(now, &location.times);
        let _ = compact(&location.times);
        let _ = render_location_list(&[location], "All CMU Dining Locations", now);
    }

    let huge = DiningLocation::from_value(&payloads[6]);
    assert_eq!(huge.times[0].start.day, i64::MAX);
    assert!(!is_open(now, &huge.times));
    let extremes = DiningLocation::from_value(&payloads[7]);
    assert!(!is_open(now, &extremes.times));

    let partial = DiningLocation::from_value(&payloads[4]);
    assert_eq!(partial.name, "Entropy+");
    assert_eq!(partial.times.len(), 3);
    assert_eq!(partial.times[0], Interval::default());

    let specials = DiningLocation::from_value(&payloads[5]);
    assert_eq!(specials.name, "Schatz");
    assert!(!specials.accepts_online_orders);
    assert_eq!(specials.todays_specials.len(), 1);
    assert_eq!(specials.todays_specials[0].title, "Pho");
}
