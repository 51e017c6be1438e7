//! Typed view of one upstream dining location record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schedule::is_open;
use super::week::{lenient_schedule, Interval, WeekInstant};

/// A CMU dining location as returned by the dining API.
///
/// Every field is optional upstream; anything absent takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiningLocation {
    pub concept_id: i64,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub location: String,
    pub accepts_online_orders: bool,
    pub url: Option<String>,
    #[serde(rename = "menu")]
    pub menu_url: Option<String>,
    #[serde(deserialize_with = "lenient_schedule")]
    pub times: Vec<Interval>,
    pub todays_specials: Vec<Special>,
}

/// A daily special on offer at a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Special {
    pub title: String,
    pub description: String,
}

impl DiningLocation {
    /// Build from a raw JSON record. Records that are not objects, or whose
    /// fields have unusable types, degrade to defaults field by field.
    pub fn from_value(value: &Value) -> Self {
        match Self::deserialize(value) {
            Ok(location) => location,
            Err(err) => {
                tracing::debug!("Lenient location parse after error: {}", err);
                Self::from_fields(value)
            }
        }
    }

    fn from_fields(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let opt_text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(str::to_string);

        Self {
            concept_id: value.get("conceptId").and_then(|v| v.as_i64()).unwrap_or(0),
            name: text("name"),
            short_description: text("shortDescription"),
            description: text("description"),
            location: text("location"),
            accepts_online_orders: value
                .get("acceptsOnlineOrders")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            url: opt_text("url"),
            menu_url: opt_text("menu"),
            times: value
                .get("times")
                .map(super::week::schedule_from_value)
                .unwrap_or_default(),
            todays_specials: value
                .get("todaysSpecials")
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| Special::deserialize(item).ok())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Parse a list of raw records.
    pub fn from_values(values: &[Value]) -> Vec<Self> {
        values.iter().map(Self::from_value).collect()
    }

    /// Open/closed status at `now`.
    pub fn status_at(&self, now: WeekInstant) -> LocationStatus {
        if is_open(now, &self.times) {
            LocationStatus::Open
        } else {
            LocationStatus::Closed
        }
    }
}

/// Current availability of a location. A location with no usable hours is
/// `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationStatus {
    Open,
    Closed,
}

impl LocationStatus {
    pub fn emoji(&self) -> &'static str {
        match self {
            LocationStatus::Open => "🟢",
            LocationStatus::Closed => "🔴",
        }
    }
}
