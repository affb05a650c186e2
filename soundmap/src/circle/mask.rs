//! Inverted circle mask: a world-sized polygon with the circle as its hole.

use serde::{Serialize, Serializer};

use crate::feature::{Feature, Geometry, PropertyValue};
use crate::geometry::{LonLat, Ring};

/// Latitude clamp for the outer mask ring.
///
/// Web Mercator diverges towards the poles; ±85° keeps the outer ring
/// inside the projectable range.
pub const MASK_LATITUDE_LIMIT: f64 = 85.0;

/// The fixed whole-earth rectangle used as the outer mask boundary.
///
/// Traversed (85, -180) → (85, 180) → (-85, 180) → (-85, -180) → (85, -180)
/// in (lat, lng) terms.
pub fn world_ring() -> Ring {
    let l = MASK_LATITUDE_LIMIT;
    Ring::new(vec![
        LonLat::new(-180.0, l),
        LonLat::new(180.0, l),
        LonLat::new(180.0, -l),
        LonLat::new(-180.0, -l),
        LonLat::new(-180.0, l),
    ])
}

/// Polygon with one hole: `outer` covers the world and `hole` is the circle
/// in reversed order.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMask {
    pub outer: Ring,
    pub hole: Ring,
}

impl CircleMask {
    /// Build the mask for a circle ring.
    pub fn from_circle(circle: &Ring) -> Self {
        Self {
            outer: world_ring(),
            hole: circle.reversed(),
        }
    }

    /// The mask as a two-ring GeoJSON polygon.
    pub fn to_geometry(&self) -> Geometry {
        Geometry::polygon([self.outer.clone(), self.hole.clone()])
    }

    /// The mask as a feature tagged `role = mask`.
    pub fn to_feature(&self) -> Feature {
        Feature::new(self.to_geometry()).with_property("role", PropertyValue::from("mask"))
    }
}

impl Serialize for CircleMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_geometry().serialize(serializer)
    }
}
