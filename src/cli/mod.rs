//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Tracklift using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Tracklift - listener data ETL from PostgreSQL to a search index
#[derive(Parser, Debug)]
#[command(name = "tracklift")]
#[command(version, about, long_about = None)]
#[command(author = "Tracklift Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tracklift.toml", env = "TRACKLIFT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRACKLIFT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline once: extract, transform, load
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show whether the index exists and its document count
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
