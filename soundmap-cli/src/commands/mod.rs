//! CLI subcommand implementations.

pub mod bbox;
pub mod circle;
pub mod common;
pub mod config;
pub mod green;
