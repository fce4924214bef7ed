//! PostgreSQL adapter implementing the source reader trait

use crate::adapters::backend::traits::SourceReader;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::core::artifact::Table;
use crate::domain::ids::TableName;
use crate::domain::Result;
use async_trait::async_trait;

/// PostgreSQL adapter
pub struct PostgreSQLAdapter {
    client: PostgreSQLClient,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceReader for PostgreSQLAdapter {
    async fn read_table(&self, table: &TableName) -> Result<Table> {
        tracing::info!(
            source = %self.client.target(),
            table = %table,
            "Reading full table snapshot"
        );
        self.client.read_table(table).await
    }

    async fn close(&self) {
        self.client.close();
    }
}
