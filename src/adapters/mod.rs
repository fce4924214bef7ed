//! External system integrations for Tracklift.
//!
//! - [`backend`] - Traits the pipeline stages talk through, and the live factory
//! - [`postgresql`] - PostgreSQL source reader
//! - [`search`] - Elasticsearch-compatible index client
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the pipeline can
//! be exercised with in-memory implementations.
//!
//! ```rust,no_run
//! use tracklift::adapters::backend::{LiveBackends, StageBackends};
//! use tracklift::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tracklift.toml")?;
//! let backends = LiveBackends::new(config.source.clone(), config.index.clone());
//!
//! let index = backends.open_index().await?;
//! index.ping().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod postgresql;
pub mod search;
