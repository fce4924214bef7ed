//! Integration tests for dry-run mode
//!
//! These tests verify that dry-run builds every document but never
//! touches the index.

mod common;

use common::{listeners, test_config, MemoryBackends, MemoryIndex};
use tempfile::TempDir;
use tracklift::core::load::run_load;
use tracklift::core::pipeline::{PipelineController, PipelineStage};

#[tokio::test]
async fn test_dry_run_pipeline_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let index = MemoryIndex::unreachable();
    let mut config = test_config(dir.path());
    config.application.dry_run = true;

    let controller = PipelineController::new(
        config,
        Box::new(MemoryBackends::new(listeners(), index.clone())),
    );
    let summary = controller.run().await;

    // An unreachable index is never contacted
    assert!(summary.is_success(), "{:?}", summary.outcome);
    assert_eq!(summary.stage, PipelineStage::End);

    let load = summary.load.as_ref().unwrap();
    assert!(load.dry_run);
    assert_eq!(load.documents, 3);
    assert_eq!(load.indexed, 0);
    assert!(!load.index_created);
    assert_eq!(index.creates(), 0);
    assert_eq!(index.bulk_requests(), 0);
}

#[tokio::test]
async fn test_load_respects_batch_size() {
    let dir = TempDir::new().unwrap();
    let index = MemoryIndex::default();
    let mut config = test_config(dir.path());
    config.index.bulk_batch_size = 2;

    let backends = MemoryBackends::new(listeners(), index.clone());
    let summary = PipelineController::new(config.clone(), Box::new(backends))
        .run()
        .await;
    assert!(summary.is_success());
    assert_eq!(index.bulk_requests(), 2);

    // Reloading the same artifact directly overwrites instead of appending
    let backends = MemoryBackends::new(listeners(), index.clone());
    let outcome = run_load(&backends, &config.index, &config.staging.canonical_path(), false)
        .await
        .unwrap();
    assert_eq!(outcome.indexed, 3);
    assert_eq!(index.document_count("music_streaming_data"), 3);
}
