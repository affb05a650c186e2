//! User configuration.
//!
//! Settings live in `~/.soundmap/config.ini`; a missing file means all
//! defaults, and a partial file overlays only the keys it names.
//!
//! # Example
//!
//! ```
//! use soundmap::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.circle.steps, 64);
//! assert_eq!(config.data.delimiting_sources().len(), 2);
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    CircleSettings, ConfigFile, DataSettings, LoggingSettings, OverpassSettings,
    DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_DELIMITING_SOURCES, DEFAULT_LOCATIONS_SOURCE,
    DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE,
};
