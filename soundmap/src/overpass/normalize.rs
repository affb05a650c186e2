//! Conversion of Overpass elements into features.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{NodeElement, QueryResult, WayElement};
use crate::feature::{Feature, Geometry};
use crate::geometry::{LonLat, Ring};

/// Converts an Overpass response into features.
///
/// - `node` → `Point` at `[lon, lat]`.
/// - `way` / `relation` with an embedded `geometry` list:
///   - 3 or more vertices → `Polygon` with one ring, closed by repeating
///     the first vertex when the last one differs;
///   - fewer → `LineString` with the raw vertices.
/// - anything else (other types, ways without geometry) is skipped.
///
/// Tags become properties; missing tags give an empty map. An element that
/// fails to decode is skipped with a warning and the rest are still
/// converted.
pub fn normalize_query_result(raw: &QueryResult) -> Vec<Feature> {
    let mut features = Vec::with_capacity(raw.elements.len());
    let mut skipped = 0usize;

    for (index, element) in raw.elements.iter().enumerate() {
        match normalize_element(element) {
            Ok(Some(feature)) => features.push(feature),
            Ok(None) => {}
            Err(e) => {
                skipped += 1;
                warn!(
                    index,
                    id = element_id(element),
                    error = %e,
                    "Skipping malformed Overpass element"
                );
            }
        }
    }

    debug!(
        elements = raw.elements.len(),
        features = features.len(),
        skipped,
        "Normalized Overpass response"
    );

    features
}

fn element_id(element: &Value) -> i64 {
    element.get("id").and_then(Value::as_i64).unwrap_or(-1)
}

fn normalize_element(element: &Value) -> Result<Option<Feature>, serde_json::Error> {
    let kind = element.get("type").and_then(Value::as_str).unwrap_or("");

    match kind {
        "node" => {
            let node = NodeElement::deserialize(element)?;
            Ok(Some(
                Feature::new(Geometry::point(LonLat::new(node.lon, node.lat)))
                    .with_properties(node.tags.unwrap_or_default()),
            ))
        }
        "way" | "relation" => {
            let way = WayElement::deserialize(element)?;
            let Some(vertices) = way.geometry else {
                return Ok(None);
            };
            let properties = way.tags.unwrap_or_default();
            let positions: Vec<LonLat> = vertices.into_iter().map(LonLat::from).collect();

            let geometry = if positions.len() >= 3 {
                let mut ring = Ring::new(positions);
                ring.close();
                Geometry::polygon([ring])
            } else {
                Geometry::line_string(positions)
            };

            Ok(Some(Feature::new(geometry).with_properties(properties)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Coordinates, GeometryKind, PropertyValue};
    use serde_json::json;

    fn result(elements: Value) -> QueryResult {
        serde_json::from_value(json!({ "elements": elements })).unwrap()
    }

    fn ring_of(feature: &Feature) -> Vec<LonLat> {
        match &feature.geometry.coordinates {
            Coordinates::Sequence(rings) => match &rings[0] {
                Coordinates::Sequence(points) => points
                    .iter()
                    .map(|c| match c {
                        Coordinates::Pair(p) => *p,
                        Coordinates::Sequence(_) => panic!("ring too deep"),
                    })
                    .collect(),
                Coordinates::Pair(_) => panic!("ring too shallow"),
            },
            Coordinates::Pair(_) => panic!("not a polygon"),
        }
    }

    #[test]
    fn test_node_becomes_point() {
        let features = normalize_query_result(&result(json!([
            {"type": "node", "id": 1, "lon": 10.0, "lat": 20.0}
        ])));

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].geometry.kind, GeometryKind::Point);
        assert_eq!(
            features[0].geometry.coordinates,
            Coordinates::Pair(LonLat::new(10.0, 20.0))
        );
        assert!(features[0].properties.is_empty());
    }

    #[test]
    fn test_open_way_is_closed_into_polygon() {
        let features = normalize_query_result(&result(json!([
            {"type": "way", "id": 7, "tags": {"leisure": "park", "name": "Parque"},
             "geometry": [
                {"lat": 0.0, "lon": 0.0},
                {"lat": 0.0, "lon": 1.0},
                {"lat": 1.0, "lon": 1.0}
             ]}
        ])));

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].geometry.kind, GeometryKind::Polygon);

        let ring = ring_of(&features[0]);
        assert_eq!(
            ring,
            vec![
                LonLat::new(0.0, 0.0),
                LonLat::new(1.0, 0.0),
                LonLat::new(1.0, 1.0),
                LonLat::new(0.0, 0.0),
            ]
        );
        assert_eq!(
            features[0].properties.get("leisure"),
            Some(&PropertyValue::Text("park".to_string()))
        );
    }

    #[test]
    fn test_closed_way_is_not_closed_twice() {
        let features = normalize_query_result(&result(json!([
            {"type": "way", "geometry": [
                {"lat": 0.0, "lon": 0.0},
                {"lat": 0.0, "lon": 1.0},
                {"lat": 1.0, "lon": 1.0},
                {"lat": 0.0, "lon": 0.0}
            ]}
        ])));
        assert_eq!(ring_of(&features[0]).len(), 4);
    }

    #[test]
    fn test_short_way_becomes_line_string() {
        let features = normalize_query_result(&result(json!([
            {"type": "relation", "geometry": [
                {"lat": 0.0, "lon": 0.0},
                {"lat": 1.0, "lon": 1.0}
            ]}
        ])));
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].geometry.kind, GeometryKind::LineString);
        assert_eq!(features[0].geometry.coordinates.position_count(), 2);
    }

    #[test]
    fn test_elements_without_shape_are_skipped() {
        let features = normalize_query_result(&result(json!([
            {"type": "way", "id": 1, "nodes": [1, 2, 3]},
            {"type": "relation", "id": 2, "members": []},
            {"type": "area", "id": 3},
            {"id": 4}
        ])));
        assert!(features.is_empty());
    }

    #[test]
    fn test_malformed_element_does_not_abort() {
        let features = normalize_query_result(&result(json!([
            {"type": "node", "id": 1, "lat": "north", "lon": 10.0},
            {"type": "way", "id": 2, "geometry": [null, {"lat": 1.0, "lon": 1.0}]},
            {"type": "node", "id": 3, "lat": 4.6, "lon": -74.07, "tags": {"natural": "wood"}},
            "not an object"
        ])));

        assert_eq!(features.len(), 1);
        assert_eq!(
            features[0].geometry.coordinates,
            Coordinates::Pair(LonLat::new(-74.07, 4.6))
        );
    }

    #[test]
    fn test_null_tags_default_to_empty() {
        let features = normalize_query_result(&result(json!([
            {"type": "node", "lat": 1.0, "lon": 2.0, "tags": null}
        ])));
        assert!(features[0].properties.is_empty());
    }

    #[test]
    fn test_missing_elements_array() {
        let raw = QueryResult::from_slice(br#"{"version": 0.6}"#).unwrap();
        assert!(normalize_query_result(&raw).is_empty());
    }
}
