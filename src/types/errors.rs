//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use rmcp::model::ErrorCode;
use rmcp::ErrorData;
use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the tool server.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation errors (map to JSON-RPC invalid params).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown method or resource (map to JSON-RPC method not found).
    #[error("not found: {0}")]
    NotFound(String),

    /// Upstream API returned an error status or an unusable body.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream call exceeded its deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convert to a JSON-RPC error code.
    pub fn to_rpc_code(&self) -> ErrorCode {
        match self {
            Error::Validation(_) => ErrorCode::INVALID_PARAMS,
            Error::NotFound(_) => ErrorCode::METHOD_NOT_FOUND,
            Error::Upstream(_)
            | Error::Timeout(_)
            | Error::Config(_)
            | Error::Internal(_)
            | Error::Serialization(_)
            | Error::Io(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// JSON-RPC error object carrying this error's code and message.
    pub fn to_error_data(&self) -> ErrorData {
        ErrorData::new(self.to_rpc_code(), self.to_string(), None)
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else {
            Error::Upstream(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_codes() {
        assert_eq!(Error::validation("x").to_rpc_code().0, -32602);
        assert_eq!(Error::not_found("x").to_rpc_code().0, -32601);
        assert_eq!(Error::upstream("x").to_rpc_code().0, -32603);
        assert_eq!(Error::timeout("x").to_rpc_code().0, -32603);
    }

    #[test]
    fn test_error_data() {
        let data = Error::validation("Unknown tool: eats_get_menu").to_error_data();
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(data.message, "validation error: Unknown tool: eats_get_menu");
        assert!(data.data.is_none());
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::upstream("503 Service Unavailable");
        assert_eq!(err.to_string(), "upstream error: 503 Service Unavailable");
    }
}
