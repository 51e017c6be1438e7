//! # Scotty MCP - CMU campus tools over the Model Context Protocol
//!
//! Exposes CMU dining, course and campus map lookups as MCP tools:
//! - Dining locations with live open/closed status and compacted hours
//! - Course, requisite, instructor and schedule lookups
//! - Building search, paths and distances
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────────┐
//!   stdio / TCP   →  │   McpServer → McpRouter         │
//!   JSON-RPC lines   │            │                    │
//!                    │      ToolRegistry               │
//!                    │  ┌──────┐ ┌──────┐ ┌───────┐    │
//!                    │  │ eats │ │ maps │ │courses│    │
//!                    │  └──┬───┘ └──┬───┘ └───┬───┘    │
//!                    └─────┼────────┼─────────┼────────┘
//!                          ▼        ▼         ▼
//!                    dining API  maps API  courses API
//! ```
//!
//! The [`dining`] module holds the pure schedule logic: whether a location is
//! open at a given week instant, and how its weekly schedule is summarized.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod dining;
pub mod mcp;
pub mod tools;
pub mod types;
pub mod upstream;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};
