//! Feature-versus-polygon containment tests.
//!
//! "Intersects" here means *at least one vertex of the feature lies inside
//! the ring*. A line or polygon that crosses a ring without any of its
//! vertices falling inside is not detected, and neither is a ring fully
//! enclosed by a large feature polygon. For the small OSM areas clipped
//! against neighbourhood-sized rings this approximation is sufficient.

use tracing::trace;

use super::{Coordinates, Feature, GeometryKind};
use crate::geometry::{point_in_polygon, Ring};

/// Whether any vertex of `feature` lies inside `ring`.
///
/// Dispatch by geometry kind:
///
/// - `Point` → a single point-in-polygon test (a non-position coordinate
///   value yields `false`).
/// - `LineString`, `MultiPoint`, `Polygon`, `MultiLineString`,
///   `MultiPolygon` → depth-first walk of the coordinate tree, returning
///   on the first vertex inside.
/// - anything else → `false`.
pub fn feature_intersects_polygon(feature: &Feature, ring: &Ring) -> bool {
    let coordinates = &feature.geometry.coordinates;

    match &feature.geometry.kind {
        GeometryKind::Point => match coordinates {
            Coordinates::Pair(p) => point_in_polygon(*p, ring),
            Coordinates::Sequence(_) => false,
        },
        GeometryKind::LineString
        | GeometryKind::MultiPoint
        | GeometryKind::Polygon
        | GeometryKind::MultiLineString
        | GeometryKind::MultiPolygon => {
            coordinates.any_position(&mut |p| point_in_polygon(p, ring))
        }
        GeometryKind::Other(kind) => {
            trace!(kind = %kind, "Unsupported geometry kind treated as outside");
            false
        }
    }
}

/// Whether `feature` intersects at least one of `polygons`.
///
/// Short-circuits on the first match. An empty polygon set never matches.
pub fn feature_intersects_any(feature: &Feature, polygons: &[Ring]) -> bool {
    polygons
        .iter()
        .any(|ring| feature_intersects_polygon(feature, ring))
}

/// Keep only the features that intersect at least one of `polygons`.
///
/// Order of the surviving features is preserved.
pub fn filter_features(features: Vec<Feature>, polygons: &[Ring]) -> Vec<Feature> {
    features
        .into_iter()
        .filter(|f| feature_intersects_any(f, polygons))
        .collect()
}
