//! Tool registry — mounts services under their prefixes and dispatches calls.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};

use super::{ToolCatalog, ToolEntry, ToolOutput, ToolService};
use crate::types::{Error, Result};

/// Result of running a tool that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(ToolOutput),
    /// The tool ran and failed; reported to the client as a tool error.
    Failure(String),
}

/// Mounted tool services plus their merged catalog.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    catalog: ToolCatalog,
    routes: HashMap<String, (Arc<dyn ToolService>, String)>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every tool of `service` as `<prefix>_<method>`.
    pub fn mount(&mut self, service: Arc<dyn ToolService>) -> Result<()> {
        let prefix = service.prefix();
        for mut entry in service.entries() {
            let method = std::mem::take(&mut entry.id);
            entry.id = format!("{}_{}", prefix, method);
            let tool_id = entry.id.clone();
            self.catalog.register(entry)?;
            self.routes.insert(tool_id, (service.clone(), method));
        }
        tracing::debug!(
            "Mounted tool service '{}' ({} tools total)",
            prefix,
            self.catalog.len()
        );
        Ok(())
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Registered tools sorted by name.
    pub fn list_tools(&self) -> Vec<&ToolEntry> {
        self.catalog.list_entries()
    }

    /// Validate `arguments`, fill defaults, and run the tool.
    ///
    /// Unknown tools and invalid arguments are errors; failures inside the
    /// tool come back as [`ToolOutcome::Failure`].
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> Result<ToolOutcome> {
        let (service, method) = self
            .routes
            .get(name)
            .ok_or_else(|| Error::validation(format!("Unknown tool: {}", name)))?;

        let mut args = arguments.unwrap_or_else(|| Value::Object(Map::new()));
        let errors = self.catalog.validate_params(name, &args)?;
        if !errors.is_empty() {
            return Err(Error::validation(format!(
                "Invalid arguments for {}: {}",
                name,
                errors.join("; ")
            )));
        }
        self.catalog.fill_defaults(name, &mut args)?;

        let started = Instant::now();
        let result = service.call(method, &args).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(output) => {
                tracing::info!(tool = name, elapsed_ms, "Tool call succeeded");
                Ok(ToolOutcome::Success(output))
            }
            Err(err) => {
                tracing::warn!(tool = name, elapsed_ms, "Tool call failed: {}", err);
                Ok(ToolOutcome::Failure(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ParamDef, ParamType};
    use serde_json::json;

    #[derive(Debug)]
    struct EchoService;

    #[async_trait::async_trait]
    impl ToolService for EchoService {
        fn prefix(&self) -> &'static str {
            "echo"
        }

        fn entries(&self) -> Vec<ToolEntry> {
            vec![
                ToolEntry::new(
                    "say",
                    "Echo the text back",
                    vec![
                        ParamDef::required("text", ParamType::String, "Text to echo"),
                        ParamDef::with_default("times", ParamType::Int, "Repeat count", json!(1)),
                    ],
                ),
                ToolEntry::new("fail", "Always fails", vec![]),
            ]
        }

        async fn call(&self, method: &str, args: &Value) -> Result<ToolOutput> {
            match method {
                "say" => {
                    let text = crate::tools::str_arg(args, "text")?;
                    let times = crate::tools::int_arg(args, "times")?;
                    Ok(ToolOutput::Markdown(text.repeat(times as usize)))
                }
                "fail" => Err(Error::upstream("boom")),
                _ => Err(Error::not_found(method.to_string())),
            }
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.mount(Arc::new(EchoService)).unwrap();
        registry
    }

    #[test]
    fn test_mount_prefixes_ids() {
        let registry = registry();
        let ids: Vec<&str> = registry.list_tools().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["echo_fail", "echo_say"]);
    }

    #[test]
    fn test_mount_twice_fails() {
        let mut registry = registry();
        assert!(registry.mount(Arc::new(EchoService)).is_err());
    }

    #[tokio::test]
    async fn test_call_fills_defaults() {
        let outcome = registry()
            .call("echo_say", Some(json!({"text": "hi"})))
            .await
            .unwrap();
        assert_eq!(outcome, ToolOutcome::Success(ToolOutput::Markdown("hi".to_string())));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let err = registry().call("echo_shout", None).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_call_invalid_arguments() {
        let err = registry()
            .call("echo_say", Some(json!({"text": 5})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Parameter 'text': expected string"));
    }

    #[tokio::test]
    async fn test_call_missing_arguments_object() {
        let err = registry().call("echo_say", None).await.unwrap_err();
        assert!(err.to_string().contains("Missing required parameter: text"));
    }

    #[tokio::test]
    async fn test_tool_failure_is_outcome() {
        let outcome = registry().call("echo_fail", None).await.unwrap();
        assert_eq!(outcome, ToolOutcome::Failure("upstream error: boom".to_string()));
    }
}
