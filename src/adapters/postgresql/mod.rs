//! PostgreSQL source integration
//!
//! This module provides the relational source the extract stage reads
//! listener records from.

pub mod adapter;
pub mod client;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
