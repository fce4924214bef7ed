//! Backend abstraction traits
//!
//! The pipeline only talks to the relational source and the search index
//! through these traits, so stages can run against in-memory doubles.

use crate::core::artifact::Table;
use crate::domain::ids::{DocumentId, IndexName, TableName};
use crate::domain::{DocumentFailure, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One document ready for the index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument {
    /// `_id`, the 1-based position in the canonical artifact
    pub id: DocumentId,

    /// `_source` body
    pub source: Map<String, Value>,
}

/// Result of a bulk write
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkWriteResult {
    /// Documents the index accepted
    pub indexed: usize,

    /// Documents the index rejected
    pub failures: Vec<DocumentFailure>,
}

impl BulkWriteResult {
    /// Folds another batch result into this one
    pub fn merge(&mut self, other: BulkWriteResult) {
        self.indexed += other.indexed;
        self.failures.extend(other.failures);
    }
}

/// Read access to the relational source
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Reads every column and row of `table`, in source order
    ///
    /// # Errors
    ///
    /// `ExtractError::ConnectionFailed` if the source is unreachable,
    /// `ExtractError::QueryFailed` if the table is missing or the read fails.
    async fn read_table(&self, table: &TableName) -> Result<Table>;

    /// Releases every connection held by the reader
    async fn close(&self);
}

/// Write access to the search index
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Liveness check; one attempt, no retries
    async fn ping(&self) -> Result<()>;

    /// Whether `index` exists
    async fn index_exists(&self, index: &IndexName) -> Result<bool>;

    /// Creates `index` with `mapping`
    ///
    /// An index created concurrently by someone else counts as success.
    async fn create_index(&self, index: &IndexName, mapping: &Value) -> Result<()>;

    /// Indexes (upserts) a batch of documents
    ///
    /// Per-document rejections are reported in the result, not as an error.
    async fn bulk_index(&self, index: &IndexName, documents: &[IndexDocument])
        -> Result<BulkWriteResult>;

    /// Makes recent writes visible to search
    async fn refresh(&self, index: &IndexName) -> Result<()>;

    /// Number of documents in `index`
    async fn count(&self, index: &IndexName) -> Result<u64>;
}

/// Opens the per-stage resources of a run
///
/// Each stage opens what it needs at its start and releases it at its end.
#[async_trait]
pub trait StageBackends: Send + Sync {
    /// Opens a reader on the relational source
    async fn open_source(&self) -> Result<Box<dyn SourceReader>>;

    /// Opens a client on the search index
    async fn open_index(&self) -> Result<Box<dyn SearchIndex>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_write_result_merge() {
        let mut total = BulkWriteResult {
            indexed: 3,
            failures: vec![],
        };
        total.merge(BulkWriteResult {
            indexed: 1,
            failures: vec![DocumentFailure::new("5", 400, "mapper_parsing_exception")],
        });

        assert_eq!(total.indexed, 4);
        assert_eq!(total.failures.len(), 1);
    }
}
