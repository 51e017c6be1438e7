//! Dining tools — locations, hours, availability and cuisine search,
//! rendered as markdown.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{failed, int_arg, str_arg, ParamDef, ParamType, ToolEntry, ToolOutput, ToolService};
use crate::dining::{
    day_name, render_location_details, render_location_list, Clock, DiningLocation, WeekInstant,
};
use crate::types::{Error, Result};
use crate::upstream::DiningApi;

/// CMU dining tools, mounted under `eats`.
#[derive(Debug, Clone)]
pub struct EatsTools {
    api: DiningApi,
    clock: Arc<dyn Clock>,
}

impl EatsTools {
    pub fn new(api: DiningApi, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    async fn fetch_all(&self) -> Result<Vec<DiningLocation>> {
        self.api
            .fetch_locations()
            .await
            .map_err(|e| failed("fetch dining locations", e))
    }

    async fn all_locations(&self) -> Result<String> {
        let locations = self.fetch_all().await?;
        Ok(render_location_list(
            &locations,
            "All CMU Dining Locations",
            self.clock.now(),
        ))
    }

    async fn search_locations(&self, name_query: &str) -> Result<String> {
        let locations = self
            .api
            .search_locations(name_query)
            .await
            .map_err(|e| failed("search dining locations", e))?;

        if locations.is_empty() {
            return Ok(format!(
                "# Search Results for '{q}'\n\nNo dining locations found matching '{q}'.",
                q = name_query
            ));
        }
        Ok(render_location_list(
            &locations,
            &format!("Search Results for '{}'", name_query),
            self.clock.now(),
        ))
    }

    async fn open_now(&self) -> Result<String> {
        let now = self.clock.now();
        let locations = self
            .api
            .locations_open_at(now)
            .await
            .map_err(|e| failed("get currently open locations", e))?;

        if locations.is_empty() {
            return Ok("# Currently Open Locations\n\nNo dining locations are currently open.".to_string());
        }
        Ok(render_location_list(&locations, "Currently Open Locations", now))
    }

    async fn open_at_time(&self, at: WeekInstant) -> Result<String> {
        validate_instant(at)?;
        let time_str = format!("{:02}:{:02}", at.hour, at.minute);
        let day = day_name(at.day);

        let locations = self
            .api
            .locations_open_at(at)
            .await
            .map_err(|e| failed("get locations open at specified time", e))?;

        if locations.is_empty() {
            return Ok(format!(
                "# Locations Open on {} at {}\n\nNo dining locations are open at this time.",
                day, time_str
            ));
        }
        Ok(render_location_list(
            &locations,
            &format!("Locations Open on {} at {}", day, time_str),
            self.clock.now(),
        ))
    }

    async fn location_hours(&self, location_name: &str) -> Result<String> {
        let locations = self.fetch_all().await?;
        let needle = location_name.to_lowercase();

        match locations
            .iter()
            .find(|l| l.name.to_lowercase().contains(&needle))
        {
            Some(location) => Ok(render_location_details(location, self.clock.now())),
            None => Ok(format!(
                "# Location Search\n\nNo location found matching '{}'. Please check the name and try again.",
                location_name
            )),
        }
    }

    async fn by_cuisine(&self, cuisine_query: &str) -> Result<String> {
        let locations = self.fetch_all().await?;
        let needle = cuisine_query.to_lowercase();

        let matching: Vec<DiningLocation> = locations
            .into_iter()
            .filter(|l| {
                l.name.to_lowercase().contains(&needle)
                    || l.short_description.to_lowercase().contains(&needle)
                    || l.description.to_lowercase().contains(&needle)
            })
            .collect();

        if matching.is_empty() {
            return Ok(format!(
                "# Cuisine Search for '{q}'\n\nNo dining locations found serving '{q}' cuisine.",
                q = cuisine_query
            ));
        }
        Ok(render_location_list(
            &matching,
            &format!("Locations Serving '{}' Cuisine", title_case(cuisine_query)),
            self.clock.now(),
        ))
    }
}

#[async_trait::async_trait]
impl ToolService for EatsTools {
    fn prefix(&self) -> &'static str {
        "eats"
    }

    fn entries(&self) -> Vec<ToolEntry> {
        vec![
            ToolEntry::new(
                "get_all_dining_locations",
                "Get all CMU dining locations with name, cuisine, location, hours, status and \
                 online ordering, grouped by cuisine type, as markdown.",
                vec![],
            ),
            ToolEntry::new(
                "search_dining_locations",
                "Search for dining locations by name and return formatted results.",
                vec![ParamDef::required(
                    "name_query",
                    ParamType::String,
                    "The name or partial name to search for (case-insensitive)",
                )],
            ),
            ToolEntry::new(
                "get_locations_open_now",
                "Get all dining locations that are currently open, grouped by cuisine type.",
                vec![],
            ),
            ToolEntry::new(
                "get_locations_open_at_time",
                "Get dining locations open at a specific day and time, grouped by cuisine type.",
                vec![
                    ParamDef::required(
                        "day",
                        ParamType::Int,
                        "Day of week (0=Sunday, 1=Monday, ..., 6=Saturday)",
                    ),
                    ParamDef::required("hour", ParamType::Int, "Hour in 24-hour format (0-23)"),
                    ParamDef::with_default("minute", ParamType::Int, "Minute (0-59)", json!(0)),
                ],
            ),
            ToolEntry::new(
                "get_location_hours",
                "Get detailed information for a dining location: hours, current status and \
                 today's specials.",
                vec![ParamDef::required(
                    "location_name",
                    ParamType::String,
                    "Name or partial name of the location",
                )],
            ),
            ToolEntry::new(
                "get_locations_by_cuisine",
                "Find dining locations by cuisine type or food description.",
                vec![ParamDef::required(
                    "cuisine_query",
                    ParamType::String,
                    "Type of cuisine or food to search for (e.g. \"pizza\", \"asian\", \"coffee\")",
                )],
            ),
        ]
    }

    async fn call(&self, method: &str, args: &Value) -> Result<ToolOutput> {
        let markdown = match method {
            "get_all_dining_locations" => self.all_locations().await?,
            "search_dining_locations" => self.search_locations(str_arg(args, "name_query")?).await?,
            "get_locations_open_now" => self.open_now().await?,
            "get_locations_open_at_time" => {
                let at = WeekInstant::new(
                    int_arg(args, "day")?,
                    int_arg(args, "hour")?,
                    int_arg(args, "minute")?,
                );
                self.open_at_time(at).await?
            }
            "get_location_hours" => self.location_hours(str_arg(args, "location_name")?).await?,
            "get_locations_by_cuisine" => self.by_cuisine(str_arg(args, "cuisine_query")?).await?,
            _ => return Err(Error::not_found(format!("Unknown eats method: {}", method))),
        };
        Ok(ToolOutput::Markdown(markdown))
    }
}

fn validate_instant(at: WeekInstant) -> Result<()> {
    if !(0..=6).contains(&at.day) {
        return Err(Error::validation("Day must be between 0 (Sunday) and 6 (Saturday)"));
    }
    if !(0..=23).contains(&at.hour) {
        return Err(Error::validation("Hour must be between 0 and 23"));
    }
    if !(0..=59).contains(&at.minute) {
        return Err(Error::validation("Minute must be between 0 and 59"));
    }
    Ok(())
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_instant() {
        assert!(validate_instant(WeekInstant::new(0, 0, 0)).is_ok());
        assert!(validate_instant(WeekInstant::new(6, 23, 59)).is_ok());
        assert_eq!(
            validate_instant(WeekInstant::new(7, 0, 0)).unwrap_err().to_string(),
            "validation error: Day must be between 0 (Sunday) and 6 (Saturday)"
        );
        assert!(validate_instant(WeekInstant::new(1, 24, 0)).is_err());
        assert!(validate_instant(WeekInstant::new(1, 12, 60)).is_err());
        assert!(validate_instant(WeekInstant::new(-1, 12, 0)).is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("pizza"), "Pizza");
        assert_eq!(title_case("ice cream"), "Ice Cream");
        assert_eq!(title_case("MIDDLE-eastern"), "Middle-Eastern");
        assert_eq!(title_case(""), "");
    }
}
