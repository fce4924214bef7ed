//! Core pipeline logic for Tracklift.
//!
//! # Modules
//!
//! - [`artifact`] - Tabular records and the CSV artifact codec
//! - [`extract`] - Source table snapshot into the staging artifact
//! - [`transform`] - Cleaning and enrichment into the canonical artifact
//! - [`load`] - Idempotent bulk load into the search index
//! - [`pipeline`] - Stage ordering and run summaries
//!
//! # Run Workflow
//!
//! 1. **Extract**: Read the whole listener table and stage it
//! 2. **Transform**: Normalize, derive `age_group`/`region`, deduplicate, fill and type
//! 3. **Load**: Ensure the index and bulk-index one document per record
//! 4. **Report**: Produce a [`pipeline::RunSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use tracklift::config::load_config;
//! use tracklift::core::pipeline::PipelineController;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tracklift.toml")?;
//! let controller = PipelineController::with_live_backends(config);
//!
//! let summary = controller.run().await;
//! println!("Reached: {}", summary.stage);
//! println!("Indexed: {}", summary.documents_indexed());
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod transform;
