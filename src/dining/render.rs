//! Markdown rendering for dining locations.

use std::collections::BTreeMap;

use super::cuisine;
use super::hours::{compact, detailed_hours};
use super::location::{DiningLocation, LocationStatus};
use super::week::WeekInstant;

const MAX_DESCRIPTION_CHARS: usize = 150;
const TRUNCATED_DESCRIPTION_CHARS: usize = 147;

/// Render one location as a markdown block.
///
/// An empty `name` renders as `"Unknown"` and an empty `location` as
/// `"Location not specified"`. Empty schedules show [`HOURS_NOT_AVAILABLE`].
///
/// [`HOURS_NOT_AVAILABLE`]: super::hours::HOURS_NOT_AVAILABLE
pub fn render_location(location: &DiningLocation, status: LocationStatus) -> String {
    let name = non_empty_or(&location.name, "Unknown");
    let place = non_empty_or(&location.location, "Location not specified");
    let cuisine = cuisine::classify(&location.name, &location.description);
    let hours = compact(&location.times);
    let online = if location.accepts_online_orders { "📱" } else { "" };

    format!(
        "### {} {} {}\n**Cuisine:** {}\n**Location:** {}\n**Hours:** {}\n**Description:** {}\n",
        status.emoji(),
        name,
        online,
        cuisine,
        place,
        hours,
        clean_description(location),
    )
}

/// Render a titled listing grouped by cuisine (alphabetical), with a summary
/// of how many locations are open at `now`.
pub fn render_location_list(locations: &[DiningLocation], title: &str, now: WeekInstant) -> String {
    if locations.is_empty() {
        return format!("# {}\n\nNo locations found.", title);
    }

    let mut by_cuisine: BTreeMap<&str, Vec<&DiningLocation>> = BTreeMap::new();
    for location in locations {
        by_cuisine
            .entry(cuisine::classify(&location.name, &location.description))
            .or_default()
            .push(location);
    }

    let open_count = locations
        .iter()
        .filter(|l| l.status_at(now) == LocationStatus::Open)
        .count();

    let mut parts = vec![
        format!("# {}\n", title),
        format!(
            "**{} locations found** • **{} currently open**\n",
            locations.len(),
            open_count
        ),
    ];

    for (cuisine, group) in &by_cuisine {
        parts.push(format!("## {} ({})\n", cuisine, group.len()));
        for location in group {
            parts.push(render_location(location, location.status_at(now)));
            parts.push(String::new());
        }
    }

    parts.join("\n")
}

/// Render the detail view of one location: the summary block, today's
/// specials, and one line per opening interval.
pub fn render_location_details(location: &DiningLocation, now: WeekInstant) -> String {
    let mut body = render_location(location, location.status_at(now));

    if !location.todays_specials.is_empty() {
        body.push_str("\n**Today's Specials:**\n");
        for special in &location.todays_specials {
            body.push_str(&format!("- **{}**: {}\n", special.title, special.description));
        }
    }

    let hours = detailed_hours(&location.times);
    if !hours.is_empty() {
        body.push_str("\n**Detailed Hours:**\n");
        for line in hours {
            body.push_str(&format!("- {}\n", line));
        }
    }

    format!("# Location Details\n\n{}", body)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn clean_description(location: &DiningLocation) -> String {
    let desc = if location.short_description.is_empty() {
        &location.description
    } else {
        &location.short_description
    };

    if desc.chars().count() > MAX_DESCRIPTION_CHARS {
        let head: String = desc.chars().take(TRUNCATED_DESCRIPTION_CHARS).collect();
        format!("{}...", head)
    } else {
        desc.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dining::week::Interval;
    use crate::dining::Special;
    use pretty_assertions::assert_eq;

    fn weekday_hours() -> Vec<Interval> {
        (1..=5)
            .map(|d| Interval::new(WeekInstant::new(d, 7, 0), WeekInstant::new(d, 21, 0)))
            .collect()
    }

    fn location(name: &str, description: &str) -> DiningLocation {
        DiningLocation {
            name: name.to_string(),
            description: description.to_string(),
            location: "Cohon Center".to_string(),
            times: weekday_hours(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_location_block() {
        let mut loc = location("La Prima Espresso", "Italian coffee bar");
        loc.short_description = "Espresso and pastries".to_string();
        loc.accepts_online_orders = true;

        assert_eq!(
            render_location(&loc, LocationStatus::Open),
            "### 🟢 La Prima Espresso 📱\n\
             **Cuisine:** Coffee\n\
             **Location:** Cohon Center\n\
             **Hours:** Monday - Friday: 7:00 AM - 9:00 PM\n\
             **Description:** Espresso and pastries\n"
        );
    }

    #[test]
    fn test_render_location_defaults() {
        let block = render_location(&DiningLocation::default(), LocationStatus::Closed);
        assert!(block.starts_with("### 🔴 Unknown \n"));
        assert!(block.contains("**Location:** Location not specified\n"));
        assert!(block.contains("**Hours:** Hours not available\n"));
        assert!(block.contains("**Cuisine:** Dining\n"));
    }

    #[test]
    fn test_long_description_truncated() {
        let loc = location("Resnik", &"x".repeat(200));
        let block = render_location(&loc, LocationStatus::Closed);
        let expected = format!("**Description:** {}...\n", "x".repeat(147));
        assert!(block.ends_with(&expected));
    }

    #[test]
    fn test_description_at_limit_not_truncated() {
        let loc = location("Resnik", &"é".repeat(150));
        let block = render_location(&loc, LocationStatus::Closed);
        assert!(block.ends_with(&format!("**Description:** {}\n", "é".repeat(150))));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(
            render_location_list(&[], "All CMU Dining Locations", WeekInstant::default()),
            "# All CMU Dining Locations\n\nNo locations found."
        );
    }

    #[test]
    fn test_render_list_groups_and_counts() {
        let mut closed = location("Taqueria Gallo", "");
        closed.times.clear();
        let locations = vec![
            location("Ciao Bella", "Pizza and pasta"),
            closed,
            location("Au Bon Pain", "Bakery"),
        ];

        let output = render_location_list(&locations, "Test", WeekInstant::new(2, 12, 0));

        assert!(output.starts_with("# Test\n\n**3 locations found** • **2 currently open**\n"));
        let dining = output.find("## Dining (1)").unwrap();
        let italian = output.find("## Italian (1)").unwrap();
        let mexican = output.find("## Mexican (1)").unwrap();
        assert!(dining < italian && italian < mexican);
        assert!(output.contains("### 🔴 Taqueria Gallo"));
        assert!(output.contains("### 🟢 Ciao Bella"));
    }

    #[test]
    fn test_render_details_with_specials_and_hours() {
        let mut loc = location("Schatz Dining Room", "");
        loc.times.truncate(1);
        loc.todays_specials = vec![Special {
            title: "Soup".to_string(),
            description: "Tomato bisque".to_string(),
        }];

        let output = render_location_details(&loc, WeekInstant::new(1, 8, 0));

        assert!(output.starts_with("# Location Details\n\n### 🟢 Schatz Dining Room"));
        assert!(output.contains("\n**Today's Specials:**\n- **Soup**: Tomato bisque\n"));
        assert!(output.ends_with("\n**Detailed Hours:**\n- Monday: 07:00 - 21:00\n"));
    }

    #[test]
    fn test_render_details_without_hours() {
        let loc = DiningLocation {
            name: "Entropy+".to_string(),
            ..Default::default()
        };
        let output = render_location_details(&loc, WeekInstant::default());
        assert!(!output.contains("Detailed Hours"));
        assert!(!output.contains("Today's Specials"));
    }
}
