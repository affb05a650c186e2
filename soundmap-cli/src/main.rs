//! Soundmap CLI - Command-line interface
//!
//! Runs the overlay cycles against the configured data sources and writes
//! GeoJSON for the map front end.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use soundmap::config::{config_file_path, ConfigFile};
use soundmap::logging::init_logging;
use tracing::debug;

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Parser)]
#[command(name = "soundmap")]
#[command(about = "Sound map overlay geometry: delimiting areas, circular masks and green areas", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ~/.soundmap/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch green areas inside the delimiting neighbourhoods
    GreenAreas {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the mask around all locations and fetch green areas inside it
    Circle {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of circle segments (overrides [circle] steps)
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Print the delimiting and circle bounding boxes
    Bbox,

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config { command } = cli.command {
        return commands::config::run(command, cli.config.as_deref());
    }

    let config_path = cli.config.unwrap_or_else(config_file_path);
    let config = ConfigFile::load_from(&config_path)?;

    let _logging_guard = init_logging(&config.logging.directory, &config.logging.file)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;
    debug!(path = %config_path.display(), "Configuration loaded");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let config = &config;
    let command = cli.command;
    runtime.block_on(async move {
        match command {
            Commands::GreenAreas { output } => commands::green::run(config, output).await,
            Commands::Circle { output, steps } => {
                commands::circle::run(config, output, steps).await
            }
            Commands::Bbox => commands::bbox::run(config).await,
            Commands::Config { .. } => Ok(()),
        }
    })
}
