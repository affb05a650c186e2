//! Sound map locations and category visibility.
//!
//! Locations are the points of interest plotted on the map. Only their
//! coordinates matter to the geometry subsystem (they size the circular
//! region); the rest is carried for the rendering side.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::geometry::LatLng;

/// Category assigned to locations without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categories shown in the legend, in display order.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Sonidos objetos",
    "Cantantes o instrumentos",
    "Eventos",
    "Bailadores",
    "Vendedores",
    "Sonidos Naturales",
    "Lugares",
];

/// Errors reading a locations document.
#[derive(Debug, Error)]
pub enum LocationsError {
    #[error("Invalid locations document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Location identifier; the data uses both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationId::Number(n) => write!(f, "{}", n),
            LocationId::Text(s) => f.write_str(s),
        }
    }
}

/// What the location's media file is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    #[default]
    #[serde(other)]
    Other,
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
}

impl Location {
    /// Category name, or [`UNCATEGORIZED`].
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Position, when both coordinates are present and finite.
    pub fn position(&self) -> Option<LatLng> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(LatLng::new(lat, lng))
            }
            _ => None,
        }
    }

    /// Whether a media file is attached.
    pub fn has_media(&self) -> bool {
        self.file.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// Coordinates arrive as numbers or numeric strings. A string that is not
/// a number leaves the coordinate unset rather than dropping the record.
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCoordinate {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawCoordinate>::deserialize(deserializer)? {
        Some(RawCoordinate::Number(n)) => Some(n),
        Some(RawCoordinate::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Parse a locations document (a JSON array of records).
///
/// Records that do not decode are skipped with a warning.
///
/// # Errors
///
/// Returns [`LocationsError::Parse`] if the document is not a JSON array.
pub fn parse_locations(body: &[u8]) -> Result<Vec<Location>, LocationsError> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(body)?;

    Ok(records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match Location::deserialize(record) {
            Ok(location) => Some(location),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed location record");
                None
            }
        })
        .collect())
}

/// Positions of every location that has coordinates.
pub fn located_points(locations: &[Location]) -> Vec<LatLng> {
    locations.iter().filter_map(Location::position).collect()
}

/// Which categories are currently shown.
///
/// Categories that were never registered are hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryVisibility {
    enabled: BTreeMap<String, bool>,
}

impl Default for CategoryVisibility {
    fn default() -> Self {
        Self::with_categories(DEFAULT_CATEGORIES.iter().copied())
    }
}

impl CategoryVisibility {
    /// Register `categories`, all enabled.
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: categories.into_iter().map(|c| (c.into(), true)).collect(),
        }
    }

    pub fn is_enabled(&self, category: &str) -> bool {
        self.enabled.get(category).copied().unwrap_or(false)
    }

    /// Flip a category and return its new state.
    ///
    /// Toggling an unregistered category registers it as enabled.
    pub fn toggle(&mut self, category: &str) -> bool {
        let state = self.enabled.entry(category.to_string()).or_insert(false);
        *state = !*state;
        *state
    }

    /// Registered categories with their state.
    pub fn categories(&self) -> impl Iterator<Item = (&str, bool)> {
        self.enabled.iter().map(|(c, e)| (c.as_str(), *e))
    }

    /// Locations that have a position and an enabled category.
    pub fn visible<'a>(&'a self, locations: &'a [Location]) -> impl Iterator<Item = &'a Location> {
        locations
            .iter()
            .filter(move |l| l.position().is_some() && self.is_enabled(l.category()))
    }
}
