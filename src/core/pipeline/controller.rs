//! Sequential pipeline controller

use super::summary::RunSummary;
use crate::adapters::backend::factory::LiveBackends;
use crate::adapters::backend::traits::StageBackends;
use crate::config::TrackliftConfig;
use crate::core::extract::run_extract;
use crate::core::load::run_load;
use crate::core::transform::run_transform;
use crate::domain::ids::RunId;
use crate::domain::{Result, TrackliftError};
use std::time::Instant;

/// Runs extract, transform and load in order, once each
///
/// Each stage starts only after the previous one has produced its
/// artifact. The first failure stops the run; the returned summary shows
/// the last state reached and the cause.
pub struct PipelineController {
    config: TrackliftConfig,
    backends: Box<dyn StageBackends>,
}

impl PipelineController {
    pub fn new(config: TrackliftConfig, backends: Box<dyn StageBackends>) -> Self {
        Self { config, backends }
    }

    /// Controller backed by PostgreSQL and the configured search index
    pub fn with_live_backends(config: TrackliftConfig) -> Self {
        let backends = LiveBackends::new(config.source.clone(), config.index.clone());
        Self::new(config, Box::new(backends))
    }

    pub fn config(&self) -> &TrackliftConfig {
        &self.config
    }

    /// Executes one run
    ///
    /// Never returns an error: failures are recorded in the summary.
    pub async fn run(&self) -> RunSummary {
        let started = Instant::now();
        let schedule = self.config.schedule.cron.clone();
        let mut summary = RunSummary::new(RunId::generate(), schedule);

        tracing::info!(
            run_id = %summary.run_id,
            environment = ?self.config.environment,
            dry_run = self.config.application.dry_run,
            schedule = summary.schedule.as_deref().unwrap_or("unscheduled"),
            "Starting pipeline run"
        );

        if let Err(e) = self.execute(&mut summary).await {
            tracing::error!(stage = %summary.stage, error = %e, "Pipeline stopped");
            summary.fail(&e);
        }

        summary.duration = started.elapsed();
        summary.log_summary();
        summary
    }

    async fn execute(&self, summary: &mut RunSummary) -> Result<()> {
        let table = self
            .config
            .source
            .table_name()
            .map_err(|e| TrackliftError::Configuration(format!("source.table: {e}")))?;
        let raw_path = self.config.staging.raw_path();
        let canonical_path = self.config.staging.canonical_path();

        let extracted = run_extract(self.backends.as_ref(), &table, &raw_path).await?;
        let staging_path = extracted.path.clone();
        summary.staging_path = Some(staging_path.clone());
        summary.extract = Some(extracted);
        summary.advance();

        // CSV I/O and the transform are synchronous; keep them off the runtime threads
        let transform_paths = (staging_path.clone(), canonical_path.clone());
        let report = tokio::task::spawn_blocking(move || {
            run_transform(&transform_paths.0, &transform_paths.1)
        })
        .await
        .map_err(|e| TrackliftError::Io(format!("transform task failed: {e}")))??;
        summary.canonical_path = Some(canonical_path.clone());
        summary.transform = Some(report);
        summary.advance();

        let loaded = run_load(
            self.backends.as_ref(),
            &self.config.index,
            &canonical_path,
            self.config.application.dry_run,
        )
        .await?;
        summary.load = Some(loaded);
        summary.advance();

        // loaded -> end
        summary.advance();
        Ok(())
    }
}
