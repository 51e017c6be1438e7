//! CMU dining API.

use crate::dining::{DiningLocation, WeekInstant};
use crate::types::{Result, UpstreamConfig};

use super::client::{locations_field, ApiClient};
use super::NO_QUERY;

#[derive(Debug, Clone)]
pub struct DiningApi {
    client: ApiClient,
}

impl DiningApi {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(&config.dining_base_url, config)?,
        })
    }

    /// All dining locations.
    pub async fn fetch_locations(&self) -> Result<Vec<DiningLocation>> {
        let body = self.client.get_json(&["locations"], NO_QUERY).await?;
        Ok(DiningLocation::from_values(&locations_field(&body)))
    }

    /// Locations whose name matches `name_query`, as decided upstream.
    pub async fn search_locations(&self, name_query: &str) -> Result<Vec<DiningLocation>> {
        let body = self
            .client
            .get_json(&["location", name_query], NO_QUERY)
            .await?;
        Ok(DiningLocation::from_values(&locations_field(&body)))
    }

    /// Locations open at `at`, as decided upstream.
    pub async fn locations_open_at(&self, at: WeekInstant) -> Result<Vec<DiningLocation>> {
        let (day, hour, minute) = (at.day.to_string(), at.hour.to_string(), at.minute.to_string());
        let body = self
            .client
            .get_json(
                &["locations", "time", day.as_str(), hour.as_str(), minute.as_str()],
                NO_QUERY,
            )
            .await?;
        Ok(DiningLocation::from_values(&locations_field(&body)))
    }
}
