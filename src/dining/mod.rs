//! Dining availability — schedule evaluation, hours compaction, and markdown
//! rendering of CMU dining locations.
//!
//! The evaluator and compactor are pure functions of their inputs. "Now" is
//! always supplied by the caller through a [`Clock`]; nothing in this module
//! reads the wall clock except [`LocalClock`] itself.

pub mod cuisine;
pub mod hours;
pub mod location;
pub mod render;
pub mod schedule;
pub mod week;

pub use hours::{compact, detailed_hours, format_clock, HOURS_NOT_AVAILABLE};
pub use location::{DiningLocation, LocationStatus, Special};
pub use render::{render_location, render_location_details, render_location_list};
pub use schedule::is_open;
pub use week::{day_name, Clock, FixedClock, Interval, LocalClock, WeekInstant, DAY_NAMES};
