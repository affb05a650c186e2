//! Overpass API response types.
//!
//! Elements are kept as raw JSON values at the top level so that one
//! malformed element cannot fail the whole document; each element is
//! decoded individually during normalization.

use serde::Deserialize;

use crate::feature::Properties;
use crate::geometry::LonLat;

/// A parsed Overpass `[out:json]` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
}

impl QueryResult {
    /// Parse a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// A `node` element.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct NodeElement {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: Option<Properties>,
}

/// A `way` or `relation` element emitted with `out geom`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct WayElement {
    #[serde(default)]
    pub geometry: Option<Vec<GeometryPoint>>,
    #[serde(default)]
    pub tags: Option<Properties>,
}

/// One vertex of an embedded `geometry` list.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(super) struct GeometryPoint {
    pub lat: f64,
    pub lon: f64,
}

impl From<GeometryPoint> for LonLat {
    fn from(p: GeometryPoint) -> Self {
        LonLat::new(p.lon, p.lat)
    }
}
