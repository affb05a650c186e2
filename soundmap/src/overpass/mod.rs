//! OpenStreetMap Overpass API integration.
//!
//! Builds green-area queries for a bounding box and turns `[out:json]`
//! responses into [`Feature`](crate::feature::Feature)s. HTTP transport lives
//! in [`crate::fetch`].
//!
//! ```text
//! BoundingBox ──► GreenAreaQuery::render ──► POST ──► QueryResult
//!                                                        │
//!                                  normalize_query_result ▼
//!                                                   Vec<Feature>
//! ```

mod normalize;
mod query;
mod types;

pub use normalize::normalize_query_result;
pub use query::{GreenAreaQuery, TagFilter, DEFAULT_QUERY_TIMEOUT_SECS};
pub use types::QueryResult;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";
