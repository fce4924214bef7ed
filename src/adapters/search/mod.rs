//! Search index integration
//!
//! REST client for the Elasticsearch-compatible service the load stage
//! writes listener documents to.

pub mod client;
pub mod models;

pub use client::{bulk_body, SearchClient};
