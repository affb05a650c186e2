//! Common types and utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use soundmap::config::ConfigFile;
use soundmap::feature::FeatureCollection;
use soundmap::fetch::AsyncReqwestClient;
use soundmap::locations::{parse_locations, Location};
use soundmap::overlay::GreenAreaLoader;
use soundmap::overpass::GreenAreaQuery;
use tracing::info;

use crate::error::CliError;

/// Build the HTTP client with the configured timeout.
pub fn http_client(config: &ConfigFile) -> Result<AsyncReqwestClient, CliError> {
    Ok(AsyncReqwestClient::with_timeout(u64::from(
        config.overpass.timeout,
    ))?)
}

/// Build a green-area loader for the configured endpoint.
pub fn green_area_loader(config: &ConfigFile) -> Result<GreenAreaLoader<AsyncReqwestClient>, CliError> {
    Ok(GreenAreaLoader::new(http_client(config)?)
        .with_endpoint(config.overpass.endpoint.as_str())
        .with_query(GreenAreaQuery::default().with_timeout_secs(config.overpass.timeout)))
}

/// Read and parse the configured locations document.
pub async fn load_locations(
    config: &ConfigFile,
    client: &AsyncReqwestClient,
) -> Result<Vec<Location>, CliError> {
    let source = config.data.locations_source();
    let body = source.load(client).await?;
    let locations = parse_locations(&body)?;
    info!(
        source = %source,
        count = locations.len(),
        with_media = locations.iter().filter(|l| l.has_media()).count(),
        "Loaded locations"
    );
    Ok(locations)
}

/// Write a collection as pretty GeoJSON to `output`, or stdout when `None`.
pub fn write_geojson(output: Option<&Path>, collection: &FeatureCollection) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(collection)
        .map_err(|e| CliError::Config(format!("Failed to serialize GeoJSON: {}", e)))?;

    match output {
        Some(path) => {
            fs::write(path, json).map_err(|error| CliError::FileWrite {
                path: path.display().to_string(),
                error,
            })?;
            info!(path = %path.display(), features = collection.len(), "Wrote GeoJSON");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json).map_err(|error| CliError::FileWrite {
                path: "<stdout>".to_string(),
                error,
            })?;
        }
    }

    Ok(())
}
