//! Run command implementation
//!
//! This module implements the `run` command: one pipeline run from the
//! source table to the search index.

use crate::config::TrackliftConfig;
use crate::core::pipeline::{FailureKind, PipelineController, RunOutcome, RunSummary};
use crate::domain::Result;
use clap::Args;

/// Per-document failures shown on the console
const MAX_FAILURES_SHOWN: usize = 10;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Dry run mode - extract and transform, but write nothing to the index
    #[arg(long)]
    pub dry_run: bool,

    /// Override the source table
    #[arg(long)]
    pub table: Option<String>,

    /// Override the target index
    #[arg(long)]
    pub index: Option<String>,
}

impl RunArgs {
    /// Execute the run command against the configuration loaded at startup
    pub async fn execute(&self, loaded: Result<TrackliftConfig>) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match loaded {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(table) = &self.table {
            tracing::info!(table = %table, "Overriding source table from CLI");
            config.source.table = table.clone();
        }

        if let Some(index) = &self.index {
            tracing::info!(index = %index, "Overriding index name from CLI");
            config.index.index_name = index.clone();
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No documents will be written to the index");
            println!();
        }

        println!("🚀 Starting pipeline run...");
        println!("  Source table: {}", config.source.table);
        println!("  Target index: {}", config.index.index_name);
        println!();

        let controller = PipelineController::with_live_backends(config);
        let summary = controller.run().await;

        print_summary(&summary);
        Ok(exit_code(&summary))
    }
}

/// Maps a finished run to the process exit code
///
/// Rejected documents do not fail the run.
pub fn exit_code(summary: &RunSummary) -> i32 {
    match summary.failure_kind() {
        None => 0,
        Some(kind) if kind.is_connection() => 4,
        Some(FailureKind::Configuration) => 2,
        Some(_) => 5,
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 Run Summary:");
    println!("  Run ID: {}", summary.run_id);
    println!("  Stage Reached: {}", summary.stage);

    if let Some(extract) = &summary.extract {
        println!("  Rows Extracted: {}", extract.rows);
    }

    if let Some(report) = &summary.transform {
        println!("  Rows Transformed: {}", report.output_rows);
        println!("  Rows Dropped (age): {}", report.rows_dropped_age);
        println!("  Duplicates Removed: {}", report.duplicates_removed);
        println!("  Nulls Filled: {}", report.nulls_filled);
    }

    if let Some(load) = &summary.load {
        if load.dry_run {
            println!("  Documents Built (dry run): {}", load.documents);
        } else {
            println!("  Documents Indexed: {}", load.indexed);
            println!("  Documents Rejected: {}", load.failures.len());
        }
    }

    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if let Some(load) = &summary.load {
        if !load.failures.is_empty() {
            println!("⚠️  Rejected documents:");
            for failure in load.failures.iter().take(MAX_FAILURES_SHOWN) {
                println!(
                    "  - document {} (status {}): {}",
                    failure.document_id, failure.status, failure.reason
                );
            }
            if load.failures.len() > MAX_FAILURES_SHOWN {
                println!(
                    "  ... and {} more rejections",
                    load.failures.len() - MAX_FAILURES_SHOWN
                );
            }
            println!();
        }
    }

    match &summary.outcome {
        RunOutcome::Succeeded if summary.documents_failed() > 0 => {
            println!("⚠️  Run completed with rejected documents");
        }
        RunOutcome::Succeeded => println!("✅ Run completed successfully!"),
        RunOutcome::Failed { kind, message } => {
            println!("❌ Run failed at stage '{}' ({kind:?})", summary.stage);
            println!("   Error: {message}");
        }
    }
}
