//! MCP method router — decodes a message, routes by method, shapes the reply.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, Implementation, ListToolsResult,
    ProtocolVersion, ServerCapabilities, ServerInfo,
};
use serde_json::{json, Value};

use super::protocol::{self, Incoming, Response};
use crate::tools::ToolRegistry;
use crate::types::{Error, Result};

const INSTRUCTIONS: &str = "Carnegie Mellon campus tools. Use the eats_ tools for dining \
locations and hours, maps_ for buildings and walking routes, and courses_ for the \
course catalog and FCE ratings.";

/// Routes JSON-RPC messages to the tool registry.
#[derive(Debug, Clone)]
pub struct McpRouter {
    registry: Arc<ToolRegistry>,
    server_name: String,
}

impl McpRouter {
    pub fn new(registry: Arc<ToolRegistry>, server_name: impl Into<String>) -> Self {
        Self {
            registry,
            server_name: server_name.into(),
        }
    }

    /// Handle one raw line. Returns the response to write, if any.
    pub async fn handle_line(&self, line: &[u8]) -> Option<Response> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        match serde_json::from_slice::<Value>(line) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => Some(Response::error(
                None,
                ErrorCode::PARSE_ERROR,
                format!("Parse error: {}", e),
            )),
        }
    }

    /// Handle one decoded message. Notifications produce no response.
    pub async fn handle_value(&self, value: Value) -> Option<Response> {
        let (id, method, params) = match Incoming::from_value(value) {
            Ok(Incoming::Request { id, method, params }) => (id, method, params),
            Ok(Incoming::Notification { method }) => {
                tracing::debug!("Notification: {}", method);
                return None;
            }
            Err(invalid) => {
                return Some(Response::error(
                    invalid.id,
                    ErrorCode::INVALID_REQUEST,
                    format!("Invalid request: {}", invalid.reason),
                ))
            }
        };

        match self.route(&method, params).await {
            Ok(result) => Some(Response::success(id, result)),
            Err(e) => {
                tracing::debug!("Request '{}' failed: {}", method, e);
                Some(Response::failure(id, e.to_error_data()))
            }
        }
    }

    async fn route(&self, method: &str, params: Value) -> Result<Value> {
        match method {
            "initialize" => Ok(serde_json::to_value(self.initialize(&params))?),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(serde_json::to_value(self.list_tools())?),
            "tools/call" => Ok(serde_json::to_value(self.call_tool(params).await?)?),
            _ => Err(Error::not_found(format!("Method not found: {}", method))),
        }
    }

    fn initialize(&self, params: &Value) -> ServerInfo {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(|v| serde_json::from_value::<ProtocolVersion>(v.clone()).ok())
            .unwrap_or(ProtocolVersion::V_2024_11_05);

        if let Some(client) = params.get("clientInfo").and_then(|c| c.get("name")) {
            tracing::info!("Client connected: {} (protocol {:?})", client, protocol_version);
        }

        let mut server_info = Implementation::from_build_env();
        server_info.name = self.server_name.clone();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            protocol_version,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    fn list_tools(&self) -> ListToolsResult {
        let tools = self
            .registry
            .list_tools()
            .iter()
            .map(|entry| entry.to_tool())
            .collect();
        ListToolsResult::with_all_items(tools)
    }

    async fn call_tool(&self, params: Value) -> Result<CallToolResult> {
        let request: CallToolRequestParam = serde_json::from_value(params)
            .map_err(|e| Error::validation(format!("Invalid tools/call params: {}", e)))?;
        let arguments = request.arguments.map(Value::Object);

        let outcome = self.registry.call(&request.name, arguments).await?;
        Ok(protocol::call_tool_result(outcome))
    }
}
