//! GeoJSON-like features and their intersection with delimiting polygons.
//!
//! A [`Feature`] is a tagged geometry plus string/number properties. The
//! coordinate tree is kept as the recursive [`Coordinates`] union rather than
//! one struct per geometry kind, so a single traversal can walk points,
//! lines, polygons and multipolygons alike.
//!
//! # Example
//!
//! ```
//! use soundmap::feature::{feature_intersects_any, Feature, Geometry};
//! use soundmap::geometry::{LonLat, Ring};
//!
//! let square: Ring = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
//!     .into_iter()
//!     .map(|(lon, lat)| LonLat::new(lon, lat))
//!     .collect();
//!
//! let park = Feature::new(Geometry::point(LonLat::new(5.0, 5.0)));
//! assert!(feature_intersects_any(&park, &[square]));
//! assert!(!feature_intersects_any(&park, &[]));
//! ```

mod intersect;

pub use intersect::{feature_intersects_any, feature_intersects_polygon, filter_features};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{LonLat, Ring};

/// Property map attached to a feature (OSM tags, GeoJSON properties).
pub type Properties = BTreeMap<String, PropertyValue>;

/// A property value: either text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Number(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

/// Geometry discriminator, using the GeoJSON type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    /// Any type name this crate does not interpret (e.g. `GeometryCollection`).
    Other(String),
}

impl GeometryKind {
    pub fn as_str(&self) -> &str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::Other(name) => name,
        }
    }
}

impl From<String> for GeometryKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Point" => GeometryKind::Point,
            "MultiPoint" => GeometryKind::MultiPoint,
            "LineString" => GeometryKind::LineString,
            "MultiLineString" => GeometryKind::MultiLineString,
            "Polygon" => GeometryKind::Polygon,
            "MultiPolygon" => GeometryKind::MultiPolygon,
            _ => GeometryKind::Other(name),
        }
    }
}

impl From<GeometryKind> for String {
    fn from(kind: GeometryKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coordinate tree: either a single position or a sequence of subtrees.
///
/// Nesting depth depends on the geometry kind: a `Point` is a bare `Pair`,
/// a `LineString` one level of `Sequence`, a `Polygon` two, a
/// `MultiPolygon` three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinates {
    Pair(LonLat),
    Sequence(Vec<Coordinates>),
}

impl Coordinates {
    /// A flat sequence of positions (`LineString`, `MultiPoint`, one ring).
    pub fn from_positions<I: IntoIterator<Item = LonLat>>(positions: I) -> Self {
        Coordinates::Sequence(positions.into_iter().map(Coordinates::Pair).collect())
    }

    /// Visit every position in the tree, depth first, stopping at the first
    /// one for which `f` returns `true`.
    pub fn any_position<F>(&self, f: &mut F) -> bool
    where
        F: FnMut(LonLat) -> bool,
    {
        match self {
            Coordinates::Pair(p) => f(*p),
            Coordinates::Sequence(items) => items.iter().any(|c| c.any_position(f)),
        }
    }

    /// Number of positions in the tree.
    pub fn position_count(&self) -> usize {
        match self {
            Coordinates::Pair(_) => 1,
            Coordinates::Sequence(items) => items.iter().map(Coordinates::position_count).sum(),
        }
    }
}

/// A typed geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: Coordinates,
}

impl Geometry {
    pub fn new(kind: GeometryKind, coordinates: Coordinates) -> Self {
        Self { kind, coordinates }
    }

    pub fn point(position: LonLat) -> Self {
        Self::new(GeometryKind::Point, Coordinates::Pair(position))
    }

    pub fn line_string<I: IntoIterator<Item = LonLat>>(positions: I) -> Self {
        Self::new(GeometryKind::LineString, Coordinates::from_positions(positions))
    }

    /// A polygon from its rings (outer boundary first, then holes).
    pub fn polygon<I: IntoIterator<Item = Ring>>(rings: I) -> Self {
        Self::new(
            GeometryKind::Polygon,
            Coordinates::Sequence(
                rings
                    .into_iter()
                    .map(|r| Coordinates::from_positions(r.into_points()))
                    .collect(),
            ),
        )
    }
}

/// A geometry with properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default)]
    pub properties: Properties,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            properties: Properties::new(),
            geometry,
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Human-readable name: `name`, falling back to `name:es`.
    pub fn display_name(&self) -> Option<&str> {
        ["name", "name:es"]
            .iter()
            .find_map(|key| self.properties.get(*key).and_then(PropertyValue::as_str))
    }
}

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
