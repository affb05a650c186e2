//! Delimiting polygons: the boundary areas external data is clipped to.
//!
//! Delimiting sources are GeoJSON documents with a `features` array. Only
//! the outer ring of each `Polygon`, or of the first member of each
//! `MultiPolygon`, is used. Several sources are unioned into one
//! [`DelimitingSet`] in which every contributing ring stays independent.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::feature::{filter_features, feature_intersects_any, Coordinates, Feature, GeometryKind};
use crate::geometry::{bounding_box_of_rings, BoundingBox, Ring};

/// Errors reading a delimiting document.
#[derive(Debug, Error)]
pub enum DelimitError {
    #[error("Invalid delimiting document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct DelimitingDocument {
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: GeometryKind,
    coordinates: Coordinates,
}

/// Extract the delimiting rings of one document.
///
/// Features without geometry, with geometry other than `Polygon` or
/// `MultiPolygon`, or whose coordinates do not have the expected shape are
/// ignored; the last case is logged.
///
/// # Errors
///
/// Returns [`DelimitError::Parse`] if the document is not JSON or has no
/// `features` array.
pub fn parse_delimiting_document(body: &[u8]) -> Result<Vec<Ring>, DelimitError> {
    let document: DelimitingDocument = serde_json::from_slice(body)?;
    let mut rings = Vec::new();

    for (index, value) in document.features.iter().enumerate() {
        let geometry = match FeatureGeometry::deserialize(value) {
            Ok(FeatureGeometry {
                geometry: Some(geometry),
            }) => geometry,
            Ok(FeatureGeometry { geometry: None }) => continue,
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed delimiting feature");
                continue;
            }
        };

        let outer = match geometry.kind {
            GeometryKind::Polygon => first_member(&geometry.coordinates),
            GeometryKind::MultiPolygon => {
                first_member(&geometry.coordinates).and_then(first_member)
            }
            _ => continue,
        };

        match outer.and_then(ring_from) {
            Some(ring) => rings.push(ring),
            None => warn!(
                index,
                kind = %geometry.kind,
                "Delimiting feature has no usable outer ring"
            ),
        }
    }

    Ok(rings)
}

fn first_member(coordinates: &Coordinates) -> Option<&Coordinates> {
    match coordinates {
        Coordinates::Sequence(items) => items.first(),
        Coordinates::Pair(_) => None,
    }
}

fn ring_from(coordinates: &Coordinates) -> Option<Ring> {
    match coordinates {
        Coordinates::Sequence(items) => items
            .iter()
            .map(|c| match c {
                Coordinates::Pair(p) => Some(*p),
                Coordinates::Sequence(_) => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Ring::new),
        Coordinates::Pair(_) => None,
    }
}

/// The set of polygons features are filtered against.
///
/// Built once per fetch cycle and not mutated afterwards; replacing the
/// active area means building a new set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DelimitingSet {
    polygons: Vec<Ring>,
}

impl DelimitingSet {
    pub fn new(polygons: Vec<Ring>) -> Self {
        Self { polygons }
    }

    /// A set holding only the given circle ring.
    pub fn from_circle(ring: Ring) -> Self {
        Self {
            polygons: vec![ring],
        }
    }

    /// Union per-source ring lists, preserving source order.
    ///
    /// `None` entries are sources that failed to load and contribute nothing.
    pub fn union<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Option<Vec<Ring>>>,
    {
        let polygons: Vec<Ring> = sources.into_iter().flatten().flatten().collect();
        debug!(polygons = polygons.len(), "Built delimiting set");
        Self { polygons }
    }

    pub fn polygons(&self) -> &[Ring] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Bounding box over all delimiting vertices, `None` when empty.
    pub fn bbox(&self) -> Option<BoundingBox> {
        bounding_box_of_rings(&self.polygons)
    }

    /// Whether `feature` has a vertex inside any delimiting polygon.
    pub fn intersects(&self, feature: &Feature) -> bool {
        feature_intersects_any(feature, &self.polygons)
    }

    /// Keep the features intersecting the set.
    pub fn filter(&self, features: Vec<Feature>) -> Vec<Feature> {
        filter_features(features, &self.polygons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Geometry;
    use crate::geometry::LonLat;

    const CAPUCHINA: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "La Capuchina"},
             "geometry": {"type": "Polygon", "coordinates": [
                [[-74.08, 4.60], [-74.07, 4.60], [-74.07, 4.61], [-74.08, 4.61], [-74.08, 4.60]],
                [[-74.076, 4.604], [-74.074, 4.604], [-74.074, 4.606], [-74.076, 4.604]]
             ]}}
        ]
    }"#;

    const VERACRUZ: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": null,
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[-74.07, 4.61], [-74.06, 4.61], [-74.06, 4.62], [-74.07, 4.61]]],
                [[[10, 10], [11, 10], [11, 11], [10, 10]]]
             ]}},
            {"type": "Feature", "properties": {},
             "geometry": {"type": "Point", "coordinates": [-74.0, 4.6]}},
            {"type": "Feature", "properties": {}, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_polygon_uses_outer_ring_only() {
        let rings = parse_delimiting_document(CAPUCHINA.as_bytes()).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0].points()[0], LonLat::new(-74.08, 4.60));
    }

    #[test]
    fn test_multipolygon_uses_first_ring_of_first_polygon() {
        let rings = parse_delimiting_document(VERACRUZ.as_bytes()).unwrap();
        assert_eq!(rings.len(), 1, "point and null geometries are ignored");
        assert_eq!(rings[0].points()[1], LonLat::new(-74.06, 4.61));
    }

    #[test]
    fn test_document_without_features_is_an_error() {
        assert!(matches!(
            parse_delimiting_document(br#"{"type": "Feature"}"#),
            Err(DelimitError::Parse(_))
        ));
        assert!(parse_delimiting_document(b"not json").is_err());
    }

    #[test]
    fn test_malformed_polygon_is_skipped() {
        let doc = r#"{"features": [
            {"geometry": {"type": "Polygon", "coordinates": [-74.0, 4.6]}},
            {"geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
        ]}"#;
        let rings = parse_delimiting_document(doc.as_bytes()).unwrap();
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn test_union_preserves_order_and_skips_failed_sources() {
        let a = parse_delimiting_document(CAPUCHINA.as_bytes()).ok();
        let b = parse_delimiting_document(VERACRUZ.as_bytes()).ok();

        let set = DelimitingSet::union([a, None, b]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.polygons()[0].points()[0], LonLat::new(-74.08, 4.60));
        assert_eq!(set.polygons()[1].points()[0], LonLat::new(-74.07, 4.61));
    }

    #[test]
    fn test_bbox_spans_all_polygons() {
        let set = DelimitingSet::union([
            parse_delimiting_document(CAPUCHINA.as_bytes()).ok(),
            parse_delimiting_document(VERACRUZ.as_bytes()).ok(),
        ]);
        let bbox = set.bbox().unwrap();
        assert_eq!(bbox, BoundingBox::new(4.60, -74.08, 4.62, -74.06));
        assert!(DelimitingSet::default().bbox().is_none());
    }

    #[test]
    fn test_filter_keeps_features_inside_either_polygon() {
        let set = DelimitingSet::union([
            parse_delimiting_document(CAPUCHINA.as_bytes()).ok(),
            parse_delimiting_document(VERACRUZ.as_bytes()).ok(),
        ]);

        let features = vec![
            Feature::new(Geometry::point(LonLat::new(-74.075, 4.605))),
            Feature::new(Geometry::point(LonLat::new(-74.062, 4.615))),
            Feature::new(Geometry::point(LonLat::new(-74.200, 4.700))),
        ];
        assert!(set.intersects(&features[0]));
        assert_eq!(set.filter(features).len(), 2);
    }
}
