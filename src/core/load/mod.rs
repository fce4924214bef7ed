//! Load stage: canonical artifact into the search index
//!
//! 1. Connect, with a bounded number of liveness checks
//! 2. Ensure the index exists with the fixed mapping
//! 3. Bulk-index one document per canonical record, `_id` = row position
//! 4. Record per-document rejections without failing the stage
//!
//! Because `_id` is the row position and every action is an `index`
//! (upsert), loading the same artifact twice leaves the same documents.

pub mod connect;
pub mod mapping;

pub use connect::connect_with_retry;
pub use mapping::{build_documents, field_type, index_mapping, FieldType, INDEX_FIELDS};

use crate::adapters::backend::traits::{BulkWriteResult, SearchIndex, StageBackends};
use crate::config::IndexConfig;
use crate::core::artifact;
use crate::domain::ids::IndexName;
use crate::domain::{DocumentFailure, Result, TrackliftError};
use crate::{log_batch_processing, log_document_failure, log_stage_complete, log_stage_start};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// What the load stage did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadOutcome {
    /// Documents built from the canonical artifact
    pub documents: usize,

    /// Documents the index accepted
    pub indexed: usize,

    /// Documents the index rejected
    #[serde(skip)]
    pub failures: Vec<DocumentFailure>,

    /// True if this run created the index
    pub index_created: bool,

    /// True if nothing was sent to the index
    pub dry_run: bool,
}

/// Index presence and size, for the `status` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatus {
    pub index: IndexName,
    pub exists: bool,
    pub documents: Option<u64>,
}

/// Creates the index with the fixed mapping unless it already exists
///
/// Returns true if the index was created by this call.
pub async fn ensure_index(index: &dyn SearchIndex, name: &IndexName) -> Result<bool> {
    if index.index_exists(name).await? {
        tracing::info!(index = %name, "Index already exists; mapping left untouched");
        return Ok(false);
    }

    tracing::info!(index = %name, "Index does not exist; creating it with the listener mapping");
    index.create_index(name, &index_mapping()).await?;
    Ok(true)
}

/// Loads the canonical artifact into the configured index
///
/// With `dry_run` set, documents are built and counted but the index is
/// never contacted.
pub async fn run_load(
    backends: &dyn StageBackends,
    config: &IndexConfig,
    canonical_path: &Path,
    dry_run: bool,
) -> Result<LoadOutcome> {
    let started = Instant::now();
    log_stage_start!("load", canonical_path.display());

    let name = config
        .index_name()
        .map_err(|e| TrackliftError::Configuration(format!("index.index_name: {e}")))?;

    let canonical = artifact::read_table(canonical_path)?;
    let documents = build_documents(&canonical);

    if dry_run {
        tracing::info!(
            documents = documents.len(),
            index = %name,
            "Dry run: skipping index connection and writes"
        );
        return Ok(LoadOutcome {
            documents: documents.len(),
            dry_run: true,
            ..LoadOutcome::default()
        });
    }

    let index = backends.open_index().await?;
    connect_with_retry(index.as_ref(), &config.retry).await?;
    let index_created = ensure_index(index.as_ref(), &name).await?;

    let batch_size = config.bulk_batch_size.max(1);
    let mut written = BulkWriteResult::default();
    for batch in documents.chunks(batch_size) {
        let batch_result = index.bulk_index(&name, batch).await?;
        written.merge(batch_result);
        log_batch_processing!(written.indexed + written.failures.len(), documents.len());
    }

    for failure in &written.failures {
        log_document_failure!(failure);
    }

    if config.refresh_after_load {
        index.refresh(&name).await?;
    }

    tracing::info!(
        index = %name,
        indexed = written.indexed,
        failed = written.failures.len(),
        "Bulk indexing finished"
    );
    log_stage_complete!("load", written.indexed, started.elapsed());

    Ok(LoadOutcome {
        documents: documents.len(),
        indexed: written.indexed,
        failures: written.failures,
        index_created,
        dry_run: false,
    })
}

/// Reports whether the index exists and how many documents it holds
pub async fn index_status(backends: &dyn StageBackends, config: &IndexConfig) -> Result<IndexStatus> {
    let name = config
        .index_name()
        .map_err(|e| TrackliftError::Configuration(format!("index.index_name: {e}")))?;

    let index = backends.open_index().await?;
    connect_with_retry(index.as_ref(), &config.retry).await?;

    let exists = index.index_exists(&name).await?;
    let documents = if exists {
        Some(index.count(&name).await?)
    } else {
        None
    };

    Ok(IndexStatus {
        index: name,
        exists,
        documents,
    })
}
