//! Core types for the tool server.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Server, upstream, transport and observability configuration

mod config;
mod errors;

pub use config::{
    Config, ObservabilityConfig, ServerConfig, Transport, TransportConfig, UpstreamConfig,
};
pub use errors::{Error, Result};
