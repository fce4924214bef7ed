//! Configuration management for Tracklift.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Tracklift uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TRACKLIFT_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tracklift::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tracklift.toml")?;
//!
//! println!("Source table: {}", config.source.table);
//! println!("Index: {} at {}", config.index.index_name, config.index.url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run flag
//! - [`SourceConfig`] - PostgreSQL connection and source table
//! - [`StagingConfig`] - Raw and canonical artifact locations
//! - [`IndexConfig`] - Search service, destination index and bulk settings
//! - [`RetryConfig`] - Index connection retry budget
//! - [`ScheduleConfig`] - Orchestrator schedule metadata
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [source]
//! connection_string = "${TRACKLIFT_PG_DSN}"
//! table = "table_m3"
//!
//! [index]
//! url = "http://elasticsearch:9200"
//! index_name = "music_streaming_data"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, Environment, IndexConfig, LoggingConfig, RetryConfig, ScheduleConfig,
    SourceConfig, StagingConfig, TrackliftConfig,
};
pub use secret::{redact_credentials, secret_string, secret_string_opt, SecretString, SecretValue};
