//! Configuration structures.
//!
//! Configuration is loaded from an optional TOML file, then environment
//! variables override individual fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::errors::{Error, Result};

/// Global server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Upstream API endpoints.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Message transport limits.
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Config {
    /// Load from `path` if given (defaults otherwise), then apply environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse config: {}", e)))
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SCOTTY_DINING_API_URL") {
            self.upstream.dining_base_url = url;
        }
        if let Some(url) = lookup("SCOTTY_COURSES_API_URL") {
            self.upstream.courses_base_url = url;
        }
        if let Some(url) = lookup("SCOTTY_MAPS_API_URL") {
            self.upstream.maps_base_url = url;
        }
        if let Some(addr) = lookup("SCOTTY_LISTEN_ADDR") {
            self.server.listen_addr = addr;
        }
    }
}

/// Which transport carries MCP messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout.
    #[default]
    Stdio,
    /// Newline-delimited JSON-RPC per TCP connection.
    Tcp,
}

impl FromStr for Transport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "tcp" => Ok(Transport::Tcp),
            other => Err(Error::config(format!(
                "Unknown transport '{}', expected 'stdio' or 'tcp'",
                other
            ))),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Transport to serve on.
    pub transport: Transport,

    /// TCP bind address (tcp transport only).
    pub listen_addr: String,

    /// Name reported in `initialize`.
    pub server_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            listen_addr: "127.0.0.1:8000".to_string(),
            server_name: "Scotty Labs MCPs for CMU".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// CMU dining API base URL.
    pub dining_base_url: String,

    /// Course tools API base URL.
    pub courses_base_url: String,

    /// Campus maps API base URL.
    pub maps_base_url: String,

    /// Total timeout for one upstream request.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            dining_base_url: "https://dining.apis.scottylabs.org".to_string(),
            courses_base_url: "https://course-tools.apis.scottylabs.org".to_string(),
            maps_base_url: "https://rust.api.maps.scottylabs.org".to_string(),
            request_timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
        }
    }
}

/// Transport limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Maximum size of one JSON-RPC message line in bytes.
    pub max_message_bytes: usize,

    /// Maximum concurrent TCP connections. Connections beyond this limit
    /// are rejected.
    pub max_connections: usize,

    /// Idle read timeout in seconds per TCP connection.
    pub read_timeout_secs: u64,

    /// Write timeout in seconds per message. Slow consumers are dropped.
    pub write_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_message_bytes: 5 * 1024 * 1024,
            max_connections: 256,
            read_timeout_secs: 300,
            write_timeout_secs: 10,
        }
    }
}
