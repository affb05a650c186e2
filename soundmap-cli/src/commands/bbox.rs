//! `bbox`: print the query bounding boxes.

use soundmap::config::ConfigFile;
use soundmap::geometry::{BoundingBox, LatLng};
use soundmap::locations::located_points;
use soundmap::overlay::{circle_around_locations, load_delimiting_set};

use super::common::{http_client, load_locations};
use crate::error::CliError;

/// Print the delimiting-set and circle bounding boxes as
/// `south,west,north,east`, with how many located points the circle box
/// covers.
pub async fn run(config: &ConfigFile) -> Result<(), CliError> {
    let client = http_client(config)?;

    let set = load_delimiting_set(&client, &config.data.delimiting_sources()).await;
    match set.bbox() {
        Some(bbox) => println!("delimiting ({} polygons): {}", set.len(), bbox),
        None => println!("delimiting: (no polygons)"),
    }

    let locations = load_locations(config, &client).await?;
    let region = circle_around_locations(
        &locations,
        config.circle.center(),
        config.circle.padding,
        config.circle.steps,
    )?;
    let bbox = region.bbox();
    let points = located_points(&locations);
    println!("circle (radius {} m): {}", region.radius_m(), bbox);
    println!(
        "located points inside circle box: {}/{}",
        points_inside(&bbox, &points),
        points.len()
    );

    Ok(())
}

/// Number of `points` inside or on `bbox`.
fn points_inside(bbox: &BoundingBox, points: &[LatLng]) -> usize {
    points.iter().filter(|p| bbox.contains(**p)).count()
}
