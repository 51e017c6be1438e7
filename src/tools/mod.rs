//! Tool infrastructure — catalog, registry, and the tool services.
//!
//! Each service owns a group of tools that share an upstream API and is
//! mounted under a name prefix (`eats_`, `maps_`, `courses_`). The registry
//! validates arguments against the catalog before a service sees them.

pub mod catalog;
pub mod courses;
pub mod eats;
pub mod maps;
pub mod registry;

pub use catalog::{ParamDef, ParamType, ToolCatalog, ToolEntry};
pub use courses::CoursesTools;
pub use eats::EatsTools;
pub use maps::MapsTools;
pub use registry::{ToolOutcome, ToolRegistry};

use std::sync::Arc;

use crate::dining::Clock;
use crate::types::{Error, Result, UpstreamConfig};
use crate::upstream::{CoursesApi, DiningApi, MapsApi};
use serde_json::Value;

/// What a tool hands back to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Human-readable markdown.
    Markdown(String),
    /// Raw JSON passed through from an upstream API.
    Json(Value),
}

/// A group of tools dispatched by method name.
#[async_trait::async_trait]
pub trait ToolService: Send + Sync + std::fmt::Debug {
    /// Prefix the service's tools are mounted under.
    fn prefix(&self) -> &'static str;

    /// Tool metadata, with ids relative to the prefix.
    fn entries(&self) -> Vec<ToolEntry>;

    /// Run `method` with arguments already validated against its entry.
    async fn call(&self, method: &str, args: &Value) -> Result<ToolOutput>;
}

/// Registry with the dining, maps and courses services mounted.
pub fn build_registry(upstream: &UpstreamConfig, clock: Arc<dyn Clock>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.mount(Arc::new(EatsTools::new(DiningApi::new(upstream)?, clock)))?;
    registry.mount(Arc::new(MapsTools::new(MapsApi::new(upstream)?)))?;
    registry.mount(Arc::new(CoursesTools::new(CoursesApi::new(upstream)?)))?;
    Ok(registry)
}

// =============================================================================
// Shared argument helpers — used by all tool services
// =============================================================================

pub(crate) fn str_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::validation(format!("Missing required field: {}", key)))
}

pub(crate) fn int_arg(args: &Value, key: &str) -> Result<i64> {
    args.get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| Error::validation(format!("Missing required field: {}", key)))
}

pub(crate) fn bool_arg(args: &Value, key: &str) -> bool {
    args.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Optional string list; absent or null means empty.
pub(crate) fn string_list_arg(args: &Value, key: &str) -> Vec<String> {
    args.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Wrap an upstream failure with what the tool was trying to do.
pub(crate) fn failed(action: &str, err: Error) -> Error {
    match err {
        Error::Timeout(msg) => Error::timeout(format!("Failed to {}: {}", action, msg)),
        Error::Upstream(msg) => Error::upstream(format!("Failed to {}: {}", action, msg)),
        other => Error::upstream(format!("Failed to {}: {}", action, other)),
    }
}
