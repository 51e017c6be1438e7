//! Model Context Protocol transport layer.
//!
//! JSON-RPC 2.0 over newline-delimited JSON, served on stdio (one client)
//! or TCP (one session per connection).

pub mod codec;
pub mod protocol;
pub mod router;
pub mod server;

pub use router::McpRouter;
pub use server::McpServer;
