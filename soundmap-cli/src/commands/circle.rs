//! `circle`: mask around the locations plus the green areas inside it.

use std::path::PathBuf;

use soundmap::config::ConfigFile;
use soundmap::feature::FeatureCollection;
use soundmap::overlay::{circle_around_locations, run_circle_cycle, OverlayContext};
use tracing::{error, info};

use super::common::{green_area_loader, load_locations, write_geojson};
use crate::error::CliError;

/// Run the circle cycle.
///
/// The output always contains the mask feature first. A failed green-area
/// fetch is logged and the mask is still written.
pub async fn run(
    config: &ConfigFile,
    output: Option<PathBuf>,
    steps: Option<usize>,
) -> Result<(), CliError> {
    let loader = green_area_loader(config)?;
    let locations = load_locations(config, loader.client()).await?;

    let region = circle_around_locations(
        &locations,
        config.circle.center(),
        config.circle.padding,
        steps.unwrap_or(config.circle.steps),
    )?;
    info!(bbox = %region.bbox(), "Circle bounding box");

    let mut features = vec![region.mask().to_feature()];

    let mut ctx = OverlayContext::new();
    match run_circle_cycle(&loader, &mut ctx, &region).await {
        Ok(Some(green)) => features.extend(green.features),
        Ok(None) => {}
        Err(e) => error!(error = %e, "Failed to load green areas inside the circle"),
    }

    write_geojson(output.as_deref(), &FeatureCollection::new(features))
}
