//! Campus maps tools.

use serde_json::{json, Value};

use super::{failed, str_arg, ParamDef, ParamType, ToolEntry, ToolOutput, ToolService};
use crate::types::{Error, Result};
use crate::upstream::MapsApi;

/// Campus map tools, mounted under `maps`.
#[derive(Debug, Clone)]
pub struct MapsTools {
    api: MapsApi,
}

impl MapsTools {
    pub fn new(api: MapsApi) -> Self {
        Self { api }
    }
}

fn route_params() -> Vec<ParamDef> {
    vec![
        ParamDef::required("start_id", ParamType::String, "Start location ID or coordinates"),
        ParamDef::required("end_id", ParamType::String, "End location ID or coordinates"),
    ]
}

#[async_trait::async_trait]
impl ToolService for MapsTools {
    fn prefix(&self) -> &'static str {
        "maps"
    }

    fn entries(&self) -> Vec<ToolEntry> {
        let query = || {
            vec![ParamDef::required(
                "query",
                ParamType::String,
                "Search text, e.g. 'morewood'",
            )]
        };

        vec![
            ToolEntry::new(
                "search_buildings",
                "Search buildings/floorplans by query string (e.g., 'morewood').",
                query(),
            ),
            ToolEntry::new(
                "get_path",
                "Get a path between two locations by ID/coordinates.",
                route_params(),
            ),
            ToolEntry::new(
                "list_possible_locations",
                "List possible location names matched by a query.",
                query(),
            ),
            ToolEntry::new(
                "distance_between",
                "Compute distance in meters between two locations (-1 if unknown).",
                route_params(),
            ),
        ]
    }

    async fn call(&self, method: &str, args: &Value) -> Result<ToolOutput> {
        let value = match method {
            "search_buildings" => {
                let results = self
                    .api
                    .search_buildings(str_arg(args, "query")?)
                    .await
                    .map_err(|e| failed("search buildings", e))?;
                json!({ "results": results })
            }
            "get_path" => self
                .api
                .get_path(str_arg(args, "start_id")?, str_arg(args, "end_id")?)
                .await
                .map_err(|e| failed("get path", e))?,
            "list_possible_locations" => {
                let names = self
                    .api
                    .list_possible_locations(str_arg(args, "query")?)
                    .await
                    .map_err(|e| failed("list possible locations", e))?;
                json!(names)
            }
            "distance_between" => {
                let distance = self
                    .api
                    .distance_between(str_arg(args, "start_id")?, str_arg(args, "end_id")?)
                    .await;
                json!(distance)
            }
            _ => return Err(Error::not_found(format!("Unknown maps method: {}", method))),
        };
        Ok(ToolOutput::Json(value))
    }
}
