//! Configuration structs and their defaults.

use std::path::PathBuf;

use crate::circle::{DEFAULT_CIRCLE_STEPS, DEFAULT_RADIUS_PADDING};
use crate::fetch::DocumentSource;
use crate::geometry::LatLng;
use crate::overpass::{DEFAULT_OVERPASS_ENDPOINT, DEFAULT_QUERY_TIMEOUT_SECS};

/// Default circle centre latitude (Plaza de la Concordia, Bogotá).
pub const DEFAULT_CENTER_LAT: f64 = 4.604169891807999;

/// Default circle centre longitude.
pub const DEFAULT_CENTER_LNG: f64 = -74.07385381204059;

pub const DEFAULT_LOCATIONS_SOURCE: &str = "locations.json";

pub const DEFAULT_DELIMITING_SOURCES: &[&str] = &["capuchina.json", "veracruz.json"];

pub const DEFAULT_LOG_DIRECTORY: &str = "logs";

pub const DEFAULT_LOG_FILE: &str = "soundmap.log";

/// Complete user configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub overpass: OverpassSettings,
    pub circle: CircleSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

/// `[overpass]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassSettings {
    pub endpoint: String,
    /// Query timeout in seconds; also the HTTP client timeout.
    pub timeout: u32,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            timeout: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}

/// `[circle]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleSettings {
    pub center_lat: f64,
    pub center_lng: f64,
    pub steps: usize,
    pub padding: f64,
}

impl Default for CircleSettings {
    fn default() -> Self {
        Self {
            center_lat: DEFAULT_CENTER_LAT,
            center_lng: DEFAULT_CENTER_LNG,
            steps: DEFAULT_CIRCLE_STEPS,
            padding: DEFAULT_RADIUS_PADDING,
        }
    }
}

impl CircleSettings {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}

/// `[data]` section: where documents are read from.
///
/// Entries are paths or `http(s)://` URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub locations: String,
    pub delimiting: Vec<String>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            locations: DEFAULT_LOCATIONS_SOURCE.to_string(),
            delimiting: DEFAULT_DELIMITING_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DataSettings {
    pub fn locations_source(&self) -> DocumentSource {
        DocumentSource::parse(&self.locations)
    }

    pub fn delimiting_sources(&self) -> Vec<DocumentSource> {
        self.delimiting
            .iter()
            .map(|s| DocumentSource::parse(s))
            .collect()
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}
