//! The two fetch cycles: delimiting documents and location circle.

use futures::future::join_all;
use tracing::{info, warn};

use super::{GreenAreaLoader, OverlayContext, OverlayError};
use crate::circle::CircleRegion;
use crate::delimit::{parse_delimiting_document, DelimitingSet};
use crate::feature::FeatureCollection;
use crate::fetch::{AsyncHttpClient, DocumentSource};
use crate::geometry::{LatLng, Ring};
use crate::locations::{located_points, Location};

/// Load and union delimiting documents.
///
/// Sources are read concurrently and unioned in the order given. A source
/// that cannot be read or parsed is logged and contributes nothing.
pub async fn load_delimiting_set<C: AsyncHttpClient>(
    client: &C,
    sources: &[DocumentSource],
) -> DelimitingSet {
    let loaded = join_all(sources.iter().map(|source| load_rings(client, source))).await;
    DelimitingSet::union(loaded)
}

async fn load_rings<C: AsyncHttpClient>(client: &C, source: &DocumentSource) -> Option<Vec<Ring>> {
    let body = match source.load(client).await {
        Ok(body) => body,
        Err(e) => {
            warn!(source = %source, error = %e, "Failed to load delimiting document");
            return None;
        }
    };

    match parse_delimiting_document(&body) {
        Ok(rings) => {
            info!(source = %source, polygons = rings.len(), "Loaded delimiting document");
            Some(rings)
        }
        Err(e) => {
            warn!(source = %source, error = %e, "Failed to parse delimiting document");
            None
        }
    }
}

/// Delimiting cycle: load the sources, make them the active set and load
/// green areas over their bounding box.
///
/// # Returns
///
/// `Ok(None)` if no source yielded a polygon (there is no area to query) or
/// if green areas were already loaded.
pub async fn run_delimiting_cycle<C: AsyncHttpClient>(
    loader: &GreenAreaLoader<C>,
    ctx: &mut OverlayContext,
    sources: &[DocumentSource],
) -> Result<Option<FeatureCollection>, OverlayError> {
    let set = load_delimiting_set(loader.client(), sources).await;
    let bbox = set.bbox();
    ctx.replace_delimiting(set);

    match bbox {
        Some(bbox) => loader.load(ctx, bbox).await,
        None => {
            warn!(sources = sources.len(), "No delimiting polygons loaded, skipping green areas");
            Ok(None)
        }
    }
}

/// Circle enclosing every located point around `center`.
///
/// The radius is the farthest haversine distance times `padding`, rounded
/// up to whole metres.
///
/// # Errors
///
/// [`OverlayError::NoLocatedPoints`] when no location has coordinates, and
/// [`OverlayError::Geometry`] for invalid `steps`.
pub fn circle_around_locations(
    locations: &[Location],
    center: LatLng,
    padding: f64,
    steps: usize,
) -> Result<CircleRegion, OverlayError> {
    let radius = crate::circle::covering_radius(center, located_points(locations), padding)
        .ok_or(OverlayError::NoLocatedPoints)?;
    info!(radius_m = radius, center = %center, "Computed circle radius");
    Ok(CircleRegion::new(center, radius, steps)?)
}

/// Circle cycle: make the circle the only delimiting polygon and load green
/// areas over its bounding box.
pub async fn run_circle_cycle<C: AsyncHttpClient>(
    loader: &GreenAreaLoader<C>,
    ctx: &mut OverlayContext,
    region: &CircleRegion,
) -> Result<Option<FeatureCollection>, OverlayError> {
    ctx.replace_delimiting(DelimitingSet::from_circle(region.ring().clone()));
    loader.load(ctx, region.bbox()).await
}
