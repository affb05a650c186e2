//! Core geometry types.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced by geometry constructors.
///
/// Predicates (`point_in_polygon`, feature intersection) never return these;
/// they degrade to `false` instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Invalid step count: {0} (must be at least 3)")]
    InvalidSteps(usize),

    #[error("Invalid radius: {0} metres (must be finite and non-negative)")]
    InvalidRadius(f64),
}

/// A position in (longitude, latitude) order, decimal degrees.
///
/// This is the order used by GeoJSON and by every ring in this crate.
/// No range validation is performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Swap into (latitude, longitude) order.
    pub fn to_lat_lng(self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lon, self.lat)
    }
}

// Serialized as a GeoJSON position: `[lon, lat]`.
impl Serialize for LonLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lon, self.lat].serialize(serializer)
    }
}

// Accepts `[lon, lat]` and `[lon, lat, alt, ...]`; extra ordinates are dropped.
impl<'de> Deserialize<'de> for LonLat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        if values.len() < 2 {
            return Err(D::Error::custom(format!(
                "position needs at least 2 ordinates, got {}",
                values.len()
            )));
        }
        Ok(Self::new(values[0], values[1]))
    }
}

/// A position in (latitude, longitude) order, as used by the map layer and
/// the locations data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Swap into (longitude, latitude) order.
    pub fn to_lon_lat(self) -> LonLat {
        LonLat::new(self.lng, self.lat)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A polygon boundary: an ordered sequence of positions.
///
/// Rings are semantically closed (first == last) but the point-in-polygon
/// test also accepts open rings since it wraps the last edge itself.
/// Winding direction is not enforced and holes are not modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<LonLat>);

impl Ring {
    pub fn new(points: Vec<LonLat>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[LonLat] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the ring has points and its first and last coincide.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Append the first point if the ring is not already closed.
    pub fn close(&mut self) {
        if let Some(first) = self.0.first().copied() {
            if !self.is_closed() {
                self.0.push(first);
            }
        }
    }

    /// The same ring traversed in the opposite direction.
    pub fn reversed(&self) -> Ring {
        Ring(self.0.iter().rev().copied().collect())
    }

    pub fn into_points(self) -> Vec<LonLat> {
        self.0
    }
}

impl From<Vec<LonLat>> for Ring {
    fn from(points: Vec<LonLat>) -> Self {
        Self(points)
    }
}

impl FromIterator<LonLat> for Ring {
    fn from_iter<I: IntoIterator<Item = LonLat>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Axis-aligned south/west/north/east rectangle in decimal degrees.
///
/// Built so that `south <= north` and `west <= east`. Boxes crossing the
/// antimeridian are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Whether the (lat, lng) position lies inside or on the box.
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }

    /// Grow the box to include another point.
    pub fn extend(&mut self, point: LatLng) {
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
    }
}

/// Formats as the Overpass bbox filter `s,w,n,e`.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lon_lat_deserializes_pair_and_triple() {
        let pair: LonLat = serde_json::from_str("[10.0, 20.0]").unwrap();
        assert_eq!(pair, LonLat::new(10.0, 20.0));

        let triple: LonLat = serde_json::from_str("[10.0, 20.0, 2600.0]").unwrap();
        assert_eq!(triple, LonLat::new(10.0, 20.0));
    }

    #[test]
    fn test_lon_lat_rejects_short_position() {
        assert!(serde_json::from_str::<LonLat>("[10.0]").is_err());
        assert!(serde_json::from_str::<LonLat>("[[10.0, 20.0]]").is_err());
    }

    #[test]
    fn test_lon_lat_serializes_as_array() {
        let json = serde_json::to_string(&LonLat::new(-74.07, 4.6)).unwrap();
        assert_eq!(json, "[-74.07,4.6]");
    }

    #[test]
    fn test_axis_swap() {
        let p = LonLat::new(-74.0, 4.6);
        assert_eq!(p.to_lat_lng(), LatLng::new(4.6, -74.0));
        assert_eq!(p.to_lat_lng().to_lon_lat(), p);
    }

    #[test]
    fn test_ring_close_appends_first_point_once() {
        let mut ring = Ring::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
        ]);
        assert!(!ring.is_closed());

        ring.close();
        assert_eq!(ring.len(), 4);
        assert!(ring.is_closed());

        ring.close();
        assert_eq!(ring.len(), 4, "closing twice must not add another point");
    }

    #[test]
    fn test_empty_ring_is_not_closed() {
        let mut ring = Ring::default();
        assert!(!ring.is_closed());
        ring.close();
        assert!(ring.is_empty());
    }

    #[test]
    fn test_ring_reversed() {
        let ring: Ring = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]
            .into_iter()
            .map(|(lon, lat)| LonLat::new(lon, lat))
            .collect();
        let reversed = ring.reversed();
        assert_eq!(reversed.points()[0], LonLat::new(1.0, 1.0));
        assert_eq!(reversed.points()[2], LonLat::new(0.0, 0.0));
        assert_eq!(reversed.reversed(), ring);
    }

    #[test]
    fn test_bbox_display_is_overpass_order() {
        let bbox = BoundingBox::new(4.5, -74.1, 4.7, -74.0);
        assert_eq!(bbox.to_string(), "4.5,-74.1,4.7,-74");
    }

    #[test]
    fn test_bbox_extend_and_contains() {
        let mut bbox = BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        bbox.extend(LatLng::new(2.0, -3.0));
        assert_eq!(bbox, BoundingBox::new(0.0, -3.0, 2.0, 0.0));
        assert!(bbox.contains(LatLng::new(1.0, -1.0)));
        assert!(!bbox.contains(LatLng::new(3.0, -1.0)));
    }

    #[test]
    fn test_geometry_error_display() {
        assert!(GeometryError::InvalidSteps(2).to_string().contains("at least 3"));
        assert!(GeometryError::InvalidRadius(-1.0)
            .to_string()
            .contains("-1"));
    }
}
