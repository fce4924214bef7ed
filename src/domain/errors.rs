//! Domain error types
//!
//! This module defines the error hierarchy for Tracklift. Each pipeline stage
//! has its own error enum so callers can tell which stage failed and why.
//! None of them expose third-party types.

use thiserror::Error;

/// Main Tracklift error type
///
/// This is the primary error type used throughout the application.
/// It wraps the stage-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TrackliftError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Extract stage errors
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Transform stage errors
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Load stage errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Artifact read/write errors
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl TrackliftError {
    /// Returns true if the error comes from an unreachable source or index
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            TrackliftError::Extract(ExtractError::ConnectionFailed(_))
                | TrackliftError::Load(LoadError::IndexConnection(_))
        )
    }
}

/// Extractor errors
///
/// Errors that occur when reading the source table.
/// These errors don't expose the PostgreSQL driver types.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The relational source could not be reached
    #[error("Failed to connect to source database: {0}")]
    ConnectionFailed(String),

    /// The table is missing or the statement was rejected
    #[error("Source query failed: {0}")]
    QueryFailed(String),
}

/// Transformer errors
///
/// Any of these aborts the transform; no canonical artifact is written.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A value in a numeric field could not be cast to the target type
    #[error("Cannot coerce value '{value}' in column '{column}' (row {row}) to {target}")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
        target: &'static str,
    },

    /// A column required by a derivation step is absent
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
}

/// Loader errors
///
/// Errors that occur when talking to the search index.
/// A single rejected document is not an error; see [`DocumentFailure`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The index service was unreachable after the whole retry budget
    #[error("Failed to connect to search index: {0}")]
    IndexConnection(String),

    /// Index creation or mapping was rejected
    #[error("Index schema error: {0}")]
    Schema(String),

    /// The bulk request itself failed in transport
    #[error("Bulk write failed: {0}")]
    BulkWrite(String),
}

/// A document the index rejected during a bulk write
///
/// Recorded and logged; never fails the run on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFailure {
    /// Document `_id` that failed
    pub document_id: String,

    /// HTTP status reported for the item
    pub status: u16,

    /// Error reason reported by the index
    pub reason: String,
}

impl DocumentFailure {
    /// Creates a new document failure
    pub fn new(document_id: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            status,
            reason: reason.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TrackliftError {
    fn from(err: std::io::Error) -> Self {
        TrackliftError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TrackliftError {
    fn from(err: serde_json::Error) -> Self {
        TrackliftError::Serialization(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for TrackliftError {
    fn from(err: csv::Error) -> Self {
        TrackliftError::Artifact(format!("CSV error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TrackliftError {
    fn from(err: toml::de::Error) -> Self {
        TrackliftError::Configuration(format!("TOML parse error: {err}"))
    }
}
