//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use soundmap::config::ConfigFileError;
use soundmap::fetch::FetchError;
use soundmap::locations::LocationsError;
use soundmap::overlay::OverlayError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to read a document
    Fetch(FetchError),
    /// Locations document could not be parsed
    Locations(LocationsError),
    /// Overlay cycle failed
    Overlay(OverlayError),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Overlay(OverlayError::Fetch(FetchError::Http(_))) => {
                eprintln!();
                eprintln!("The Overpass API may be busy or rate limiting requests.");
                eprintln!("Try again later, or set [overpass] endpoint in the config file");
                eprintln!("to another instance.");
            }
            CliError::Overlay(OverlayError::NoLocatedPoints) => {
                eprintln!();
                eprintln!("Every location needs numeric 'lat' and 'lng' fields to be");
                eprintln!("included in the circle.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::Fetch(e) => write!(f, "Failed to read document: {}", e),
            CliError::Locations(e) => write!(f, "Failed to read locations: {}", e),
            CliError::Overlay(e) => write!(f, "Overlay failed: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::Locations(e) => Some(e),
            CliError::Overlay(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

impl From<LocationsError> for CliError {
    fn from(e: LocationsError) -> Self {
        CliError::Locations(e)
    }
}

impl From<OverlayError> for CliError {
    fn from(e: OverlayError) -> Self {
        CliError::Overlay(e)
    }
}
