//! `green-areas`: green areas inside the delimiting neighbourhoods.

use std::path::PathBuf;

use soundmap::config::ConfigFile;
use soundmap::overlay::{run_delimiting_cycle, OverlayContext};
use tracing::warn;

use super::common::{green_area_loader, write_geojson};
use crate::error::CliError;

/// Run the delimiting cycle and write the clipped green areas.
pub async fn run(config: &ConfigFile, output: Option<PathBuf>) -> Result<(), CliError> {
    let loader = green_area_loader(config)?;
    let mut ctx = OverlayContext::new();

    let sources = config.data.delimiting_sources();
    match run_delimiting_cycle(&loader, &mut ctx, &sources).await? {
        Some(collection) => write_geojson(output.as_deref(), &collection),
        None => {
            warn!("No delimiting polygons could be loaded; nothing to query");
            Err(CliError::Config(format!(
                "none of the delimiting sources yielded a polygon: {}",
                config.data.delimiting.join(", ")
            )))
        }
    }
}
