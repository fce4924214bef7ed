//! Run summary and reporting
//!
//! A [`RunSummary`] is what the orchestrator sees: how far the run got, how
//! it ended and the row counts of every stage it completed.

use super::stage::PipelineStage;
use crate::core::extract::ExtractOutcome;
use crate::core::load::LoadOutcome;
use crate::core::transform::TransformReport;
use crate::domain::ids::RunId;
use crate::domain::{ExtractError, LoadError, TrackliftError, TransformError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Category of a run failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Configuration,
    SourceConnection,
    Query,
    TypeCoercion,
    MissingColumn,
    IndexConnection,
    Schema,
    BulkWrite,
    Artifact,
    Io,
    Serialization,
}

impl FailureKind {
    /// True for unreachable source or index
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            FailureKind::SourceConnection | FailureKind::IndexConnection
        )
    }
}

impl From<&TrackliftError> for FailureKind {
    fn from(error: &TrackliftError) -> Self {
        match error {
            TrackliftError::Configuration(_) => FailureKind::Configuration,
            TrackliftError::Extract(ExtractError::ConnectionFailed(_)) => {
                FailureKind::SourceConnection
            }
            TrackliftError::Extract(ExtractError::QueryFailed(_)) => FailureKind::Query,
            TrackliftError::Transform(TransformError::TypeCoercion { .. }) => {
                FailureKind::TypeCoercion
            }
            TrackliftError::Transform(TransformError::MissingColumn(_)) => {
                FailureKind::MissingColumn
            }
            TrackliftError::Load(LoadError::IndexConnection(_)) => FailureKind::IndexConnection,
            TrackliftError::Load(LoadError::Schema(_)) => FailureKind::Schema,
            TrackliftError::Load(LoadError::BulkWrite(_)) => FailureKind::BulkWrite,
            TrackliftError::Artifact(_) => FailureKind::Artifact,
            TrackliftError::Io(_) => FailureKind::Io,
            TrackliftError::Serialization(_) => FailureKind::Serialization,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Succeeded,
    Failed { kind: FailureKind, message: String },
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,

    /// Last state reached
    pub stage: PipelineStage,

    pub outcome: RunOutcome,

    /// Staging artifact, once extracted
    pub staging_path: Option<PathBuf>,

    /// Canonical artifact, once transformed
    pub canonical_path: Option<PathBuf>,

    pub extract: Option<ExtractOutcome>,
    pub transform: Option<TransformReport>,
    pub load: Option<LoadOutcome>,

    /// Orchestrator schedule the run belongs to, if configured
    pub schedule: Option<String>,

    #[serde(skip)]
    pub duration: Duration,
}

impl RunSummary {
    /// A fresh summary at [`PipelineStage::Start`]
    pub fn new(run_id: RunId, schedule: Option<String>) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            stage: PipelineStage::Start,
            outcome: RunOutcome::Succeeded,
            staging_path: None,
            canonical_path: None,
            extract: None,
            transform: None,
            load: None,
            schedule,
            duration: Duration::ZERO,
        }
    }

    /// Moves to the next state
    pub fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            self.stage = next;
        }
    }

    /// Records the error that halted the run
    pub fn fail(&mut self, error: &TrackliftError) {
        self.outcome = RunOutcome::Failed {
            kind: FailureKind::from(error),
            message: error.to_string(),
        };
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RunOutcome::Succeeded)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            RunOutcome::Succeeded => None,
            RunOutcome::Failed { kind, .. } => Some(*kind),
        }
    }

    /// Documents accepted by the index
    pub fn documents_indexed(&self) -> usize {
        self.load.as_ref().map(|l| l.indexed).unwrap_or(0)
    }

    /// Documents rejected by the index
    pub fn documents_failed(&self) -> usize {
        self.load.as_ref().map(|l| l.failures.len()).unwrap_or(0)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            stage = %self.stage,
            schedule = self.schedule.as_deref().unwrap_or("unscheduled"),
            success = self.is_success(),
            rows_extracted = self.extract.as_ref().map(|e| e.rows).unwrap_or(0),
            rows_transformed = self.transform.as_ref().map(|t| t.output_rows).unwrap_or(0),
            documents_indexed = self.documents_indexed(),
            documents_failed = self.documents_failed(),
            duration_ms = self.duration.as_millis() as u64,
            "Pipeline run finished"
        );

        if let RunOutcome::Failed { kind, message } = &self.outcome {
            tracing::error!(
                run_id = %self.run_id,
                stage = %self.stage,
                kind = ?kind,
                error = %message,
                "Pipeline run failed"
            );
        }
    }
}
