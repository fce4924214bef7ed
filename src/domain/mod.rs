//! Domain types for Tracklift.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Validated identifiers** ([`TableName`], [`IndexName`], [`DocumentId`], [`RunId`])
//! - **Error types** ([`TrackliftError`], [`ExtractError`], [`TransformError`], [`LoadError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TrackliftError>`]. Stage errors
//! convert into the main error with `?`:
//!
//! ```rust
//! use tracklift::domain::{ExtractError, Result};
//!
//! fn read() -> Result<()> {
//!     Err(ExtractError::QueryFailed("relation \"table_m3\" does not exist".to_string()))?
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{DocumentFailure, ExtractError, LoadError, TrackliftError, TransformError};
pub use ids::{DocumentId, IndexName, RunId, TableName};
pub use result::Result;
