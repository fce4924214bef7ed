//! Backend abstraction layer
//!
//! Traits for the relational source and the search index, plus the factory
//! that opens live implementations.

pub mod factory;
pub mod traits;

pub use factory::LiveBackends;
pub use traits::{BulkWriteResult, IndexDocument, SearchIndex, SourceReader, StageBackends};
