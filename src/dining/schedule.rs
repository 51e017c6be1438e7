//! Schedule evaluation — is a location open at a given week instant?

use super::week::{Interval, WeekInstant};

/// True if `now` falls inside any interval of `schedule`.
///
/// Intervals are half-open: a location closing at exactly `now` is closed.
/// Order and overlap of the intervals do not matter. Intervals are compared
/// on the linear week, so a window that would wrap from Saturday into
/// Sunday never matches.
pub fn is_open(now: WeekInstant, schedule: &[Interval]) -> bool {
    schedule.iter().any(|interval| interval.contains(now))
}
