//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//! - Event macros shared by the pipeline stages
//!
//! # Example
//!
//! ```no_run
//! use tracklift::logging::init_logging;
//! use tracklift::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a pipeline stage
///
/// # Example
///
/// ```no_run
/// use tracklift::log_stage_start;
///
/// log_stage_start!("extract", "table_m3");
/// ```
#[macro_export]
macro_rules! log_stage_start {
    ($stage:expr, $input:expr) => {
        tracing::info!(stage = $stage, input = %$input, "Stage started");
    };
}

/// Log the completion of a pipeline stage
///
/// # Example
///
/// ```no_run
/// use tracklift::log_stage_complete;
/// use std::time::Duration;
///
/// log_stage_complete!("transform", 42, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_stage_complete {
    ($stage:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            stage = $stage,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Stage completed"
        );
    };
}

/// Log a batch processing operation
///
/// # Example
///
/// ```no_run
/// use tracklift::log_batch_processing;
///
/// log_batch_processing!(500, 1000);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing batch"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use tracklift::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection refused");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}

/// Log a document the index rejected
///
/// # Example
///
/// ```no_run
/// use tracklift::log_document_failure;
/// use tracklift::domain::DocumentFailure;
///
/// let failure = DocumentFailure::new("7", 400, "mapper_parsing_exception");
/// log_document_failure!(&failure);
/// ```
#[macro_export]
macro_rules! log_document_failure {
    ($failure:expr) => {
        tracing::warn!(
            document_id = %$failure.document_id,
            status = $failure.status,
            reason = %$failure.reason,
            "Document rejected by index"
        );
    };
}
