//! Circular region of interest on a spherical earth.
//!
//! Generates an approximate circle ring around a centre, the bounding box
//! of that circle, and the inverted "mask" polygon that darkens everything
//! outside it.
//!
//! # Projection
//!
//! Offsets are computed with an equirectangular small-circle approximation:
//!
//! ```text
//! dLat = dy / R · 180/π
//! dLng = dx / (R · cos(lat₀)) · 180/π        R = 6 371 000 m
//! ```
//!
//! This is accurate for city-scale radii (kilometres) away from the poles.
//! It is not a geodesic circle and makes no attempt to be one.

mod mask;

pub use mask::{world_ring, CircleMask, MASK_LATITUDE_LIMIT};

use std::f64::consts::{PI, TAU};

use crate::geometry::{BoundingBox, GeometryError, LatLng, LonLat, Ring};

/// Mean earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Number of segments used for the overlay circle.
pub const DEFAULT_CIRCLE_STEPS: usize = 64;

/// Padding applied to the farthest location when sizing the circle.
pub const DEFAULT_RADIUS_PADDING: f64 = 1.25;

/// Convert a planar offset in metres at `center` into degree deltas.
///
/// Returns `(dLat, dLng)`.
#[inline]
fn offset_degrees(center: LatLng, dx: f64, dy: f64) -> (f64, f64) {
    let d_lat = (dy / EARTH_RADIUS_M) * (180.0 / PI);
    let d_lng = (dx / (EARTH_RADIUS_M * (center.lat * PI / 180.0).cos())) * (180.0 / PI);
    (d_lat, d_lng)
}

fn validate_radius(radius_m: f64) -> Result<(), GeometryError> {
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Err(GeometryError::InvalidRadius(radius_m));
    }
    Ok(())
}

/// Generates a closed ring approximating a circle.
///
/// # Arguments
///
/// * `center` - Circle centre
/// * `radius_m` - Radius in metres
/// * `steps` - Number of segments (at least 3)
///
/// # Returns
///
/// A ring of `steps + 1` positions in (lon, lat) order, starting due east of
/// the centre and running counter-clockwise; the last position is an exact
/// copy of the first.
pub fn generate_circle_ring(
    center: LatLng,
    radius_m: f64,
    steps: usize,
) -> Result<Ring, GeometryError> {
    if steps < 3 {
        return Err(GeometryError::InvalidSteps(steps));
    }
    validate_radius(radius_m)?;

    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let angle = (i as f64 / steps as f64) * TAU;
        let dx = radius_m * angle.cos();
        let dy = radius_m * angle.sin();
        let (d_lat, d_lng) = offset_degrees(center, dx, dy);
        points.push(LonLat::new(center.lng + d_lng, center.lat + d_lat));
    }
    points.push(points[0]);

    Ok(Ring::new(points))
}

/// Bounding box of the circle of `radius_m` around `center`.
///
/// Computed directly from the projection formulas rather than by scanning a
/// generated ring. A negative radius is treated as its magnitude.
pub fn bounding_box_of_radius(center: LatLng, radius_m: f64) -> BoundingBox {
    let r = radius_m.abs();
    let (d_lat, d_lng) = offset_degrees(center, r, r);
    BoundingBox::new(
        center.lat - d_lat,
        center.lng - d_lng,
        center.lat + d_lat,
        center.lng + d_lng,
    )
}

/// Great-circle distance in metres (haversine, R = [`EARTH_RADIUS_M`]).
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let rad = PI / 180.0;
    let lat1 = a.lat * rad;
    let lat2 = b.lat * rad;
    let sin_d_lat = ((b.lat - a.lat) * rad / 2.0).sin();
    let sin_d_lng = ((b.lng - a.lng) * rad / 2.0).sin();
    let h = sin_d_lat * sin_d_lat + lat1.cos() * lat2.cos() * sin_d_lng * sin_d_lng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Radius that covers every point around `center`, with padding.
///
/// `ceil(max distance × padding)` in whole metres, or `None` when there
/// are no points.
pub fn covering_radius<I>(center: LatLng, points: I, padding: f64) -> Option<f64>
where
    I: IntoIterator<Item = LatLng>,
{
    points
        .into_iter()
        .map(|p| haversine_distance(center, p))
        .fold(None, |max: Option<f64>, d| Some(max.map_or(d, |m| m.max(d))))
        .map(|max| (max * padding).ceil())
}

/// A circle with its derived ring, bounding box and mask.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleRegion {
    center: LatLng,
    radius_m: f64,
    ring: Ring,
    bbox: BoundingBox,
}

impl CircleRegion {
    /// Build the region for `center` and `radius_m`, sampled with `steps`
    /// segments.
    pub fn new(center: LatLng, radius_m: f64, steps: usize) -> Result<Self, GeometryError> {
        let ring = generate_circle_ring(center, radius_m, steps)?;
        Ok(Self {
            center,
            radius_m,
            ring,
            bbox: bounding_box_of_radius(center, radius_m),
        })
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// The circle boundary in (lon, lat) order.
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Mask polygon darkening everything outside the circle.
    pub fn mask(&self) -> CircleMask {
        CircleMask::from_circle(&self.ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{bounding_box_of_points, point_in_polygon};

    const CAPUCHINA: LatLng = LatLng {
        lat: 4.604169891807999,
        lng: -74.07385381204059,
    };

    #[test]
    fn test_four_step_circle_at_origin() {
        let ring = generate_circle_ring(LatLng::new(0.0, 0.0), 111_000.0, 4).unwrap();

        assert_eq!(ring.len(), 5);
        assert!(ring.is_closed());

        for p in ring.points() {
            let arc = (p.lon * p.lon + p.lat * p.lat).sqrt();
            assert!((arc - 1.0).abs() < 0.01, "{} is {}° from centre", p, arc);
        }
    }

    #[test]
    fn test_first_point_is_due_east() {
        let ring = generate_circle_ring(LatLng::new(0.0, 0.0), 111_000.0, 8).unwrap();
        let first = ring.points()[0];
        assert_eq!(first.lat, 0.0);
        assert!(first.lon > 0.99);
    }

    #[test]
    fn test_step_count_validation() {
        assert_eq!(
            generate_circle_ring(CAPUCHINA, 500.0, 2),
            Err(GeometryError::InvalidSteps(2))
        );
        assert!(generate_circle_ring(CAPUCHINA, 500.0, 3).is_ok());
    }

    #[test]
    fn test_radius_validation() {
        assert!(matches!(
            generate_circle_ring(CAPUCHINA, -1.0, 16),
            Err(GeometryError::InvalidRadius(_))
        ));
        assert!(matches!(
            generate_circle_ring(CAPUCHINA, f64::NAN, 16),
            Err(GeometryError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_longitude_stretches_away_from_equator() {
        let bbox = bounding_box_of_radius(LatLng::new(60.0, 10.0), 10_000.0);
        let lat_span = bbox.north - bbox.south;
        let lng_span = bbox.east - bbox.west;
        // cos(60°) = 0.5
        assert!((lng_span / lat_span - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_radius_bbox_matches_ring_bbox() {
        let ring = generate_circle_ring(CAPUCHINA, 1_350.0, DEFAULT_CIRCLE_STEPS).unwrap();
        let scanned =
            bounding_box_of_points(ring.points().iter().map(|p| p.to_lat_lng())).unwrap();
        let direct = bounding_box_of_radius(CAPUCHINA, 1_350.0);

        assert!((scanned.south - direct.south).abs() < 1e-6);
        assert!((scanned.north - direct.north).abs() < 1e-6);
        assert!((scanned.west - direct.west).abs() < 1e-6);
        assert!((scanned.east - direct.east).abs() < 1e-6);
    }

    #[test]
    fn test_centre_is_inside_its_circle() {
        let ring = generate_circle_ring(CAPUCHINA, 800.0, DEFAULT_CIRCLE_STEPS).unwrap();
        assert!(point_in_polygon(CAPUCHINA.to_lon_lat(), &ring));
        assert!(!point_in_polygon(
            LonLat::new(CAPUCHINA.lng + 0.05, CAPUCHINA.lat),
            &ring
        ));
    }

    #[test]
    fn test_haversine_one_degree_at_equator() {
        let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert!((d - 111_194.9).abs() < 1.0, "got {}", d);
        assert_eq!(haversine_distance(CAPUCHINA, CAPUCHINA), 0.0);
    }

    #[test]
    fn test_covering_radius_pads_and_rounds_up() {
        let near = LatLng::new(0.0, 0.001);
        let far = LatLng::new(0.01, 0.0);
        let max = haversine_distance(LatLng::new(0.0, 0.0), far);

        let radius = covering_radius(LatLng::new(0.0, 0.0), [near, far], 1.25).unwrap();
        assert_eq!(radius, (max * 1.25).ceil());
        assert_eq!(radius.fract(), 0.0);
    }

    #[test]
    fn test_covering_radius_without_points() {
        assert_eq!(covering_radius(CAPUCHINA, Vec::new(), 1.25), None);
    }

    #[test]
    fn test_circle_region_accessors() {
        let region = CircleRegion::new(CAPUCHINA, 1_000.0, 32).unwrap();
        assert_eq!(region.center(), CAPUCHINA);
        assert_eq!(region.radius_m(), 1_000.0);
        assert_eq!(region.ring().len(), 33);
        assert_eq!(region.bbox(), bounding_box_of_radius(CAPUCHINA, 1_000.0));
        assert_eq!(region.mask().hole, region.ring().reversed());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_ring_is_closed_with_steps_plus_one_points(
                lat in -80.0..80.0_f64,
                lng in -180.0..180.0_f64,
                radius in 0.0..100_000.0_f64,
                steps in 3usize..256,
            ) {
                let ring = generate_circle_ring(LatLng::new(lat, lng), radius, steps).unwrap();
                prop_assert_eq!(ring.len(), steps + 1);
                prop_assert!(ring.is_closed());
            }

            #[test]
            fn test_bbox_agreement(
                lat in -70.0..70.0_f64,
                lng in -170.0..170.0_f64,
                radius in 1.0..50_000.0_f64,
                quarter_steps in 1usize..32,
            ) {
                let center = LatLng::new(lat, lng);
                let ring = generate_circle_ring(center, radius, quarter_steps * 4).unwrap();
                let scanned = bounding_box_of_points(
                    ring.points().iter().map(|p| p.to_lat_lng()),
                ).unwrap();
                let direct = bounding_box_of_radius(center, radius);

                prop_assert!((scanned.south - direct.south).abs() < 1e-6);
                prop_assert!((scanned.north - direct.north).abs() < 1e-6);
                prop_assert!((scanned.west - direct.west).abs() < 1e-6);
                prop_assert!((scanned.east - direct.east).abs() < 1e-6);
            }
        }
    }
}
