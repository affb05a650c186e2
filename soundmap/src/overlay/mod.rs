//! Overlay orchestration.
//!
//! Ties the pieces together into the two fetch cycles:
//!
//! ```text
//! delimiting documents ──► DelimitingSet ──► bbox ──┐
//!                                                   ├─► GreenAreaLoader::load ──► FeatureCollection
//! locations ──► covering radius ──► CircleRegion ───┘
//! ```
//!
//! Both cycles write the active set into an [`OverlayContext`] before
//! loading, so filtering always runs against the set the bbox came from.
//! Only the first successful load is kept; later calls return `None`.

mod context;
mod cycle;
mod loader;

pub use context::OverlayContext;
pub use cycle::{
    circle_around_locations, load_delimiting_set, run_circle_cycle, run_delimiting_cycle,
};
pub use loader::GreenAreaLoader;

use thiserror::Error;

use crate::fetch::FetchError;
use crate::geometry::GeometryError;

/// Errors from an overlay cycle.
///
/// None of these are fatal to the caller; the overlay is simply absent.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid Overpass response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid circle: {0}")]
    Geometry(#[from] GeometryError),

    #[error("No location has coordinates")]
    NoLocatedPoints,
}
