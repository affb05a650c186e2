//! INI parsing logic for converting `Ini` → `ConfigFile`.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_f64(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(section, key, value, "must be a number"))
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [overpass] section
    if let Some(section) = ini.section(Some("overpass")) {
        if let Some(v) = section.get("endpoint") {
            let v = v.trim();
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(invalid("overpass", "endpoint", v, "must be an http(s) URL"));
            }
            config.overpass.endpoint = v.to_string();
        }
        if let Some(v) = section.get("timeout") {
            config.overpass.timeout = v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| {
                    invalid("overpass", "timeout", v, "must be a positive integer (seconds)")
                })?;
        }
    }

    // [circle] section
    if let Some(section) = ini.section(Some("circle")) {
        if let Some(v) = section.get("center_lat") {
            let lat = parse_f64("circle", "center_lat", v)?;
            if !(-90.0..=90.0).contains(&lat) {
                return Err(invalid("circle", "center_lat", v, "must be between -90 and 90"));
            }
            config.circle.center_lat = lat;
        }
        if let Some(v) = section.get("center_lng") {
            let lng = parse_f64("circle", "center_lng", v)?;
            if !(-180.0..=180.0).contains(&lng) {
                return Err(invalid("circle", "center_lng", v, "must be between -180 and 180"));
            }
            config.circle.center_lng = lng;
        }
        if let Some(v) = section.get("steps") {
            config.circle.steps = v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|s| *s >= 3)
                .ok_or_else(|| invalid("circle", "steps", v, "must be an integer >= 3"))?;
        }
        if let Some(v) = section.get("padding") {
            let padding = parse_f64("circle", "padding", v)?;
            if padding <= 0.0 {
                return Err(invalid("circle", "padding", v, "must be greater than 0"));
            }
            config.circle.padding = padding;
        }
    }

    // [data] section
    if let Some(section) = ini.section(Some("data")) {
        if let Some(v) = section.get("locations") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("data", "locations", v, "must not be empty"));
            }
            config.data.locations = expand_source(v);
        }
        if let Some(v) = section.get("delimiting") {
            config.data.delimiting = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(expand_source)
                .collect();
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if v.is_empty() || v.contains('/') {
                return Err(invalid("logging", "file", v, "must be a plain file name"));
            }
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

/// Expand `~/` in a data source unless it is a URL.
fn expand_source(source: &str) -> String {
    if source.starts_with("~/") {
        expand_tilde(source).to_string_lossy().into_owned()
    } else {
        source.to_string()
    }
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
