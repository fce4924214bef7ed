//! Extract stage: full table snapshot into the staging artifact

use crate::adapters::backend::traits::StageBackends;
use crate::core::artifact;
use crate::domain::ids::TableName;
use crate::domain::Result;
use crate::{log_stage_complete, log_stage_start};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What the extract stage produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractOutcome {
    /// Staging artifact location
    pub path: PathBuf,

    /// Rows read from the source
    pub rows: usize,

    /// Columns read from the source
    pub columns: usize,
}

/// Reads every row of `table` and writes it to `staging_path`
///
/// A staging artifact left by an earlier run is removed before the read,
/// and the source reader is closed whether or not the read succeeds.
pub async fn run_extract(
    backends: &dyn StageBackends,
    table: &TableName,
    staging_path: &Path,
) -> Result<ExtractOutcome> {
    let started = Instant::now();
    log_stage_start!("extract", table);

    if artifact::remove_artifact(staging_path)? {
        tracing::debug!(path = %staging_path.display(), "Removed stale staging artifact");
    }

    let source = backends.open_source().await?;
    let result = source.read_table(table).await;
    source.close().await;
    let snapshot = result?;

    artifact::write_table(&snapshot, staging_path)?;

    tracing::info!(
        rows = snapshot.len(),
        columns = snapshot.columns().len(),
        path = %staging_path.display(),
        "Staging artifact written"
    );
    log_stage_complete!("extract", snapshot.len(), started.elapsed());

    Ok(ExtractOutcome {
        path: staging_path.to_path_buf(),
        rows: snapshot.len(),
        columns: snapshot.columns().len(),
    })
}
