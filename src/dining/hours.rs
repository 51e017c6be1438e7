//! Weekly hours formatting.
//!
//! `compact` folds a schedule into one display line, grouping days that share
//! the exact same rendered open/close clock strings:
//!
//! ```text
//! Monday - Friday: 7:00 AM - 9:00 PM | Saturday - Sunday: 9:00 AM - 3:00 PM
//! ```
//!
//! Groups are keyed by the rendered string, not by minute values, and appear
//! in the order their first interval appears in the input.

use std::collections::BTreeSet;

use super::week::{day_name, Interval};

/// Returned by [`compact`] for an empty schedule.
pub const HOURS_NOT_AVAILABLE: &str = "Hours not available";

/// Render a time of day on the 12-hour clock, e.g. `13:05` → `"1:05 PM"`.
pub fn format_clock(hour: i64, minute: i64) -> String {
    match hour {
        0 => format!("12:{:02} AM", minute),
        h if h < 12 => format!("{}:{:02} AM", h, minute),
        12 => format!("12:{:02} PM", minute),
        h => format!("{}:{:02} PM", h - 12, minute),
    }
}

/// Days sharing one rendered time range.
#[derive(Debug)]
struct DisplayGroup {
    time_range: String,
    days: BTreeSet<i64>,
}

/// Compact a schedule into a single human-readable line.
pub fn compact(schedule: &[Interval]) -> String {
    if schedule.is_empty() {
        return HOURS_NOT_AVAILABLE.to_string();
    }

    let mut groups: Vec<DisplayGroup> = Vec::new();
    for interval in schedule {
        let time_range = format!(
            "{} - {}",
            format_clock(interval.start.hour, interval.start.minute),
            format_clock(interval.end.hour, interval.end.minute),
        );

        match groups.iter_mut().find(|g| g.time_range == time_range) {
            Some(group) => {
                group.days.insert(interval.start.day);
            }
            None => groups.push(DisplayGroup {
                time_range,
                days: BTreeSet::from([interval.start.day]),
            }),
        }
    }

    groups
        .iter()
        .map(|group| format!("{}: {}", day_label(&group.days), group.time_range))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Collapse a sorted day set into its display label.
fn day_label(days: &BTreeSet<i64>) -> String {
    let sorted: Vec<i64> = days.iter().copied().collect();

    match sorted.as_slice() {
        [single] => day_name(*single).to_string(),
        [0, 1, 2, 3, 4, 5, 6] => "Daily".to_string(),
        [1, 2, 3, 4, 5] => "Monday - Friday".to_string(),
        [0, 6] => "Saturday - Sunday".to_string(),
        _ => consecutive_runs(&sorted).join(", "),
    }
}

/// Merge maximal runs of consecutive day indices into `"First - Last"`
/// tokens. Saturday and Sunday are not treated as adjacent.
fn consecutive_runs(sorted: &[i64]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut iter = sorted.iter().copied();
    let Some(first) = iter.next() else {
        return tokens;
    };

    let (mut run_start, mut run_end) = (first, first);
    for day in iter {
        if day == run_end + 1 {
            run_end = day;
        } else {
            tokens.push(run_token(run_start, run_end));
            run_start = day;
            run_end = day;
        }
    }
    tokens.push(run_token(run_start, run_end));
    tokens
}

fn run_token(start: i64, end: i64) -> String {
    if start == end {
        day_name(start).to_string()
    } else {
        format!("{} - {}", day_name(start), day_name(end))
    }
}

/// One line per interval, in input order, on the 24-hour clock:
/// `"Monday: 07:00 - 21:00"`.
pub fn detailed_hours(schedule: &[Interval]) -> Vec<String> {
    schedule
        .iter()
        .map(|interval| {
            format!(
                "{}: {:02}:{:02} - {:02}:{:02}",
                day_name(interval.start.day),
                interval.start.hour,
                interval.start.minute,
                interval.end.hour,
                interval.end.minute,
            )
        })
        .collect()
}
