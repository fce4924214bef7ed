//! PostgreSQL client implementation
//!
//! Reads a full table snapshot over the simple-query (text) protocol, so
//! every column comes back as its textual rendering regardless of SQL type.

use crate::config::{redact_credentials, SourceConfig};
use crate::core::artifact::{Cell, Column, ColumnType, Table};
use crate::domain::ids::TableName;
use crate::domain::{ExtractError, Result, TrackliftError};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::{NoTls, SimpleQueryMessage};

/// PostgreSQL client for the extract stage
///
/// Holds a single-connection pool; the connection is only opened when the
/// first query runs.
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Statement timeout applied to every session
    statement_timeout_seconds: u64,

    /// Connection target with credentials removed, for logs
    target: String,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unparsable connection string and
    /// `ExtractError::ConnectionFailed` if TLS or the pool cannot be set up.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let connection_string = config.connection_string.expose_secret().as_str();
        let target = redact_credentials(connection_string);

        let mut pg_config: tokio_postgres::Config = connection_string.parse().map_err(|e| {
            TrackliftError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
        })?;
        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = match config.ssl_mode.as_str() {
            "disable" => {
                pg_config.ssl_mode(SslMode::Disable);
                Manager::from_config(pg_config, NoTls, manager_config)
            }
            mode => {
                pg_config.ssl_mode(if mode == "require" {
                    SslMode::Require
                } else {
                    SslMode::Prefer
                });
                let connector = native_tls::TlsConnector::new().map_err(|e| {
                    ExtractError::ConnectionFailed(format!("Failed to initialize TLS: {e}"))
                })?;
                Manager::from_config(pg_config, MakeTlsConnector::new(connector), manager_config)
            }
        };

        let timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
        let pool = Pool::builder(manager)
            .max_size(1)
            .wait_timeout(timeout)
            .create_timeout(timeout)
            .recycle_timeout(timeout)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                ExtractError::ConnectionFailed(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self {
            pool,
            statement_timeout_seconds: config.statement_timeout_seconds,
            target,
        })
    }

    /// Connection target without credentials
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Reads every row of `table` in source order
    ///
    /// # Errors
    ///
    /// `ExtractError::ConnectionFailed` when no connection can be opened,
    /// `ExtractError::QueryFailed` when the statement is rejected.
    pub async fn read_table(&self, table: &TableName) -> Result<Table> {
        let client = self.pool.get().await.map_err(|e| {
            ExtractError::ConnectionFailed(format!("{}: {}", self.target, e))
        })?;

        client
            .batch_execute(&format!(
                "SET statement_timeout = {}",
                self.statement_timeout_seconds * 1000
            ))
            .await
            .map_err(|e| ExtractError::ConnectionFailed(format!("Failed to set statement timeout: {e}")))?;

        let sql = format!("SELECT * FROM {}", table.quoted());
        tracing::debug!(sql = %sql, "Reading source table");

        let messages = client.simple_query(&sql).await.map_err(|e| {
            let detail = e
                .as_db_error()
                .map(|db| db.message().to_string())
                .unwrap_or_else(|| e.to_string());
            ExtractError::QueryFailed(format!("{sql}: {detail}"))
        })?;

        table_from_messages(messages)
    }

    /// Closes the pool and every connection it holds
    pub fn close(&self) {
        self.pool.close();
        tracing::debug!(target_db = %self.target, "PostgreSQL pool closed");
    }
}

/// Builds a text-typed table from a simple-query response
fn table_from_messages(messages: Vec<SimpleQueryMessage>) -> Result<Table> {
    let mut columns: Vec<Column> = Vec::new();
    let mut rows = Vec::new();

    for message in messages {
        match message {
            SimpleQueryMessage::RowDescription(description) => {
                columns = description
                    .iter()
                    .map(|c| Column::new(c.name(), ColumnType::Text))
                    .collect();
            }
            SimpleQueryMessage::Row(row) => {
                if columns.is_empty() {
                    columns = row
                        .columns()
                        .iter()
                        .map(|c| Column::new(c.name(), ColumnType::Text))
                        .collect();
                }
                rows.push(
                    (0..row.len())
                        .map(|i| Cell::from(row.get(i)))
                        .collect::<Vec<Cell>>(),
                );
            }
            _ => {}
        }
    }

    Table::new(columns, rows)
}
