//! Campus maps API proxy.

use serde_json::Value;

use crate::types::{Result, UpstreamConfig};

use super::client::ApiClient;

/// Returned by [`MapsApi::distance_between`] when no distance is available.
pub const UNKNOWN_DISTANCE: f64 = -1.0;

#[derive(Debug, Clone)]
pub struct MapsApi {
    client: ApiClient,
}

impl MapsApi {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(&config.maps_base_url, config)?,
        })
    }

    /// Buildings and floorplans matching `query`.
    pub async fn search_buildings(&self, query: &str) -> Result<Vec<Value>> {
        let body = self.client.get_json(&["search"], &[("query", query)]).await?;
        Ok(normalize_results(body))
    }

    pub async fn get_path(&self, start_id: &str, end_id: &str) -> Result<Value> {
        self.client
            .get_json(&["path"], &[("start", start_id), ("end", end_id)])
            .await
    }

    /// Names of the search results that carry one.
    pub async fn list_possible_locations(&self, query: &str) -> Result<Vec<String>> {
        let results = self.search_buildings(query).await?;
        Ok(results
            .iter()
            .filter_map(|r| r.get("name").and_then(|n| n.as_str()))
            .map(str::to_string)
            .collect())
    }

    /// Path distance in meters, or [`UNKNOWN_DISTANCE`] on any failure.
    pub async fn distance_between(&self, start_id: &str, end_id: &str) -> f64 {
        match self.get_path(start_id, end_id).await {
            Ok(path) => path_distance(&path),
            Err(err) => {
                tracing::warn!("Distance lookup {} -> {} failed: {}", start_id, end_id, err);
                UNKNOWN_DISTANCE
            }
        }
    }
}

/// The search endpoint answers with either a list or `{"results": [...]}`.
fn normalize_results(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn path_distance(path: &Value) -> f64 {
    match path.get("distance") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(UNKNOWN_DISTANCE),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(UNKNOWN_DISTANCE),
        _ => UNKNOWN_DISTANCE,
    }
}
