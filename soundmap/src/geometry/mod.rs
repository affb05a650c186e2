//! Planar geometry primitives on geographic coordinates.
//!
//! Coordinates are treated as plain (x = longitude, y = latitude) values.
//! There is no projection here; the rings involved are city-scale, so the
//! distortion of testing containment directly in degrees is negligible.

mod types;

pub use types::{BoundingBox, GeometryError, LatLng, LonLat, Ring};

/// Tests whether a point lies inside a ring using the even-odd rule.
///
/// A horizontal ray is cast from the point towards +longitude and every ring
/// edge it crosses toggles the result. Each edge is half-open in latitude
/// (`(yi > y) != (yj > y)`) so a ray passing exactly through a shared vertex
/// is counted once.
///
/// The ring may be open or closed; the edge from the last point back to the
/// first is always tested. A closing duplicate point contributes a
/// zero-length edge which never counts as a crossing.
///
/// # Boundary points
///
/// A point lying exactly on an edge may report either `true` or `false`
/// depending on the edge orientation. This is inherent to the even-odd
/// formulation and is left as is.
///
/// # Returns
///
/// `false` for rings with fewer than 3 points.
pub fn point_in_polygon(point: LonLat, ring: &Ring) -> bool {
    let vs = ring.points();
    if vs.len() < 3 {
        return false;
    }

    let (x, y) = (point.lon, point.lat);
    let mut inside = false;

    let mut j = vs.len() - 1;
    for i in 0..vs.len() {
        let (xi, yi) = (vs[i].lon, vs[i].lat);
        let (xj, yj) = (vs[j].lon, vs[j].lat);

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Computes the bounding box of a set of (lat, lng) points.
///
/// `south`/`north` are the min/max latitude, `west`/`east` the min/max
/// longitude.
///
/// # Returns
///
/// `None` when `points` is empty; callers decide what an empty area means.
pub fn bounding_box_of_points<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = LatLng>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;

    let mut bbox = BoundingBox::new(first.lat, first.lng, first.lat, first.lng);
    for point in iter {
        bbox.extend(point);
    }
    Some(bbox)
}

/// Bounding box over every vertex of every ring.
pub fn bounding_box_of_rings<'a, I>(rings: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a Ring>,
{
    bounding_box_of_points(
        rings
            .into_iter()
            .flat_map(|ring| ring.points().iter().map(|p| p.to_lat_lng())),
    )
}
