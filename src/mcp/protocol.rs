//! JSON-RPC 2.0 envelopes around the MCP model types.
//!
//! Request, result and error payloads are `rmcp::model` types; this module
//! only classifies inbound messages and wraps outbound ones.

use rmcp::model::{CallToolResult, Content, ErrorCode, RequestId};
use rmcp::ErrorData;
use serde::Serialize;
use serde_json::Value;

use crate::tools::{ToolOutcome, ToolOutput};

pub const JSONRPC_VERSION: &str = "2.0";

/// A parsed inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    /// Expects a response. `id` is `None` only for an explicit `"id": null`.
    Request {
        id: Option<RequestId>,
        method: String,
        params: Value,
    },
    /// No `id`; never answered.
    Notification { method: String },
}

/// Why a JSON value is not an acceptable message.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidMessage {
    /// Request id, if one could be recovered.
    pub id: Option<RequestId>,
    pub reason: String,
}

impl InvalidMessage {
    fn new(id: Option<RequestId>, reason: &str) -> Self {
        Self {
            id,
            reason: reason.to_string(),
        }
    }
}

impl Incoming {
    /// Classify a decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, InvalidMessage> {
        let Value::Object(mut obj) = value else {
            return Err(InvalidMessage::new(None, "Request must be a JSON object"));
        };

        let has_id = obj.contains_key("id");
        let id = match obj.remove("id") {
            None | Some(Value::Null) => None,
            Some(raw) => match serde_json::from_value::<RequestId>(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    return Err(InvalidMessage::new(
                        None,
                        "Request id must be a string or number",
                    ))
                }
            },
        };

        let method = match obj.remove("method") {
            Some(Value::String(m)) => m,
            Some(_) => return Err(InvalidMessage::new(id, "method must be a string")),
            None => return Err(InvalidMessage::new(id, "Missing method")),
        };

        if !has_id {
            return Ok(Incoming::Notification { method });
        }
        let params = obj.remove("params").unwrap_or(Value::Null);
        Ok(Incoming::Request { id, method, params })
    }
}

/// Outbound JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    jsonrpc: &'static str,
    /// Serialized as `null` when the request id is unknown.
    pub id: Option<RequestId>,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseBody {
    Result(Value),
    Error(ErrorData),
}

impl Response {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            body: ResponseBody::Result(result),
        }
    }

    pub fn failure(id: Option<RequestId>, error: ErrorData) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            body: ResponseBody::Error(error),
        }
    }

    /// Error response with no data payload.
    pub fn error(id: Option<RequestId>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::failure(id, ErrorData::new(code, message.into(), None))
    }
}

/// Shape a tool outcome as a `tools/call` result.
pub fn call_tool_result(outcome: ToolOutcome) -> CallToolResult {
    match outcome {
        ToolOutcome::Success(ToolOutput::Markdown(text)) => {
            CallToolResult::success(vec![Content::text(text)])
        }
        ToolOutcome::Success(ToolOutput::Json(value)) => {
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            let mut result = CallToolResult::success(vec![Content::text(text)]);
            if value.is_object() {
                result.structured_content = Some(value);
            }
            result
        }
        ToolOutcome::Failure(message) => CallToolResult::error(vec![Content::text(message)]),
    }
}
