//! Upstream JSON APIs — dining, courses, and campus maps.
//!
//! These are thin proxies: one timed HTTP call per operation, light
//! normalization of the response, no retries.

pub mod client;
pub mod courses;
pub mod dining;
pub mod maps;

pub use client::ApiClient;
pub use courses::CoursesApi;
pub use dining::DiningApi;
pub use maps::{MapsApi, UNKNOWN_DISTANCE};

/// Empty query string.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];
