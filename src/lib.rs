// Tracklift - Listener Data ETL from PostgreSQL to a Search Index
// Copyright (c) 2025 Tracklift Contributors
// Licensed under the MIT License

//! # Tracklift - Listener Data ETL
//!
//! Tracklift moves the listener table of a music-streaming service from
//! PostgreSQL into a search index, cleaning and enriching it on the way.
//!
//! ## Overview
//!
//! One run is three stages, executed strictly in order:
//! - **Extracting** the whole source table into a staging CSV artifact
//! - **Transforming** it into the canonical artifact: normalized names and
//!   text, `age_group` and `region` derived, duplicates removed, nulls
//!   filled, numeric columns typed
//! - **Loading** one document per canonical record, `_id` being the row
//!   position, so repeated runs overwrite instead of duplicating
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Stages, artifacts and the pipeline controller
//! - [`adapters`] - PostgreSQL reader and search index client
//! - [`domain`] - Identifiers and the error taxonomy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tracklift::config::load_config;
//! use tracklift::core::pipeline::PipelineController;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("tracklift.toml")?;
//!     let summary = PipelineController::with_live_backends(config).run().await;
//!
//!     println!("Indexed {} documents", summary.documents_indexed());
//!     Ok(())
//! }
//! ```
//!
//! ## Transforming Without a Database
//!
//! The transform stage is a chain of pure functions over a [`core::artifact::Table`]:
//!
//! ```rust
//! use tracklift::core::artifact::parse_table;
//! use tracklift::core::transform::transform_table;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = "user_id,age,country\n5,40,USA\n";
//! let (table, report) = transform_table(parse_table(raw.as_bytes())?)?;
//!
//! assert_eq!(report.output_rows, 1);
//! assert!(table.column_index("user_id").is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::TrackliftError`]; stage
//! failures stop the run and are reported in the
//! [`core::pipeline::RunSummary`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
