//! INI serialization logic for converting `ConfigFile` → `Ini`.

use ini::Ini;

use super::settings::ConfigFile;

/// Build the INI representation written to `config.ini`.
///
/// Keys appear in the same order `config list` prints them.
pub(super) fn to_ini(config: &ConfigFile) -> Ini {
    let mut ini = Ini::new();

    ini.with_section(Some("overpass"))
        .set("endpoint", config.overpass.endpoint.as_str())
        .set("timeout", config.overpass.timeout.to_string());

    ini.with_section(Some("circle"))
        .set("center_lat", config.circle.center_lat.to_string())
        .set("center_lng", config.circle.center_lng.to_string())
        .set("steps", config.circle.steps.to_string())
        .set("padding", config.circle.padding.to_string());

    ini.with_section(Some("data"))
        .set("locations", config.data.locations.as_str())
        .set("delimiting", config.data.delimiting.join(", "));

    ini.with_section(Some("logging"))
        .set("directory", config.logging.directory.to_string_lossy().into_owned())
        .set("file", config.logging.file.as_str());

    ini
}

/// Flatten the configuration into `section.key = value` pairs.
pub(super) fn to_entries(config: &ConfigFile) -> Vec<(String, String)> {
    let ini = to_ini(config);
    let mut entries = Vec::new();

    for (section, properties) in ini.iter() {
        let Some(section) = section else {
            continue;
        };
        for (key, value) in properties.iter() {
            entries.push((format!("{}.{}", section, key), value.to_string()));
        }
    }

    entries
}
