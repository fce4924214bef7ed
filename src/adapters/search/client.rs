//! Search service client implementation
//!
//! A thin REST client for an Elasticsearch-compatible service. It performs
//! single attempts only; connection retries belong to the load stage.

use super::models::{BulkResponse, CountResponse, ErrorResponse};
use crate::adapters::backend::traits::{BulkWriteResult, IndexDocument, SearchIndex};
use crate::config::{IndexConfig, SecretString};
use crate::domain::ids::IndexName;
use crate::domain::{LoadError, Result, TrackliftError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::time::Duration;

/// Search service client
///
/// # Example
///
/// ```no_run
/// use tracklift::adapters::search::SearchClient;
/// use tracklift::adapters::backend::traits::SearchIndex;
/// use tracklift::config::IndexConfig;
///
/// # async fn example() -> tracklift::domain::Result<()> {
/// let client = SearchClient::new(&IndexConfig::default())?;
/// client.ping().await?;
/// # Ok(())
/// # }
/// ```
pub struct SearchClient {
    /// Base URL without a trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    username: Option<String>,
    password: Option<SecretString>,
}

impl SearchClient {
    /// Create a new search client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for the search index");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            TrackliftError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                let credentials = format!("{}:{}", username, password.expose_secret().as_str());
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                Some(format!("Basic {encoded}"))
            }
            _ => None,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}/{}", self.base_url, path));
        if let Some(auth) = self.auth_header_value() {
            request = request.header("Authorization", auth);
        }
        request
    }
}

/// Builds the NDJSON body of a bulk request
///
/// Every document becomes an `index` action so a repeated id overwrites.
pub fn bulk_body(index: &IndexName, documents: &[IndexDocument]) -> Result<String> {
    let mut body = String::new();
    for document in documents {
        let action = json!({ "index": { "_index": index.as_str(), "_id": document.id.to_string() } });
        body.push_str(&serde_json::to_string(&action)?);
        body.push('\n');
        body.push_str(&serde_json::to_string(&document.source)?);
        body.push('\n');
    }
    Ok(body)
}

#[async_trait]
impl SearchIndex for SearchClient {
    async fn ping(&self) -> Result<()> {
        let resp = self
            .request(Method::GET, "")
            .send()
            .await
            .map_err(|e| LoadError::IndexConnection(format!("{}: {}", self.base_url, e)))?;

        if !resp.status().is_success() {
            return Err(LoadError::IndexConnection(format!(
                "Liveness check against {} returned status {}",
                self.base_url,
                resp.status()
            ))
            .into());
        }
        Ok(())
    }

    async fn index_exists(&self, index: &IndexName) -> Result<bool> {
        let resp = self
            .request(Method::HEAD, index.as_str())
            .send()
            .await
            .map_err(|e| LoadError::IndexConnection(e.to_string()))?;

        match resp.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(LoadError::Schema(format!(
                "Checking index '{index}' returned status {status}"
            ))
            .into()),
        }
    }

    async fn create_index(&self, index: &IndexName, mapping: &Value) -> Result<()> {
        let resp = self
            .request(Method::PUT, index.as_str())
            .json(mapping)
            .send()
            .await
            .map_err(|e| LoadError::IndexConnection(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        let already_exists = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error_type().map(|t| t == "resource_already_exists_exception"))
            .unwrap_or(false);

        if already_exists {
            tracing::info!(index = %index, "Index was created concurrently; leaving it untouched");
            return Ok(());
        }

        Err(LoadError::Schema(format!(
            "Creating index '{index}' failed with status {status}: {body}"
        ))
        .into())
    }

    async fn bulk_index(
        &self,
        index: &IndexName,
        documents: &[IndexDocument],
    ) -> Result<BulkWriteResult> {
        if documents.is_empty() {
            return Ok(BulkWriteResult::default());
        }

        let body = bulk_body(index, documents)?;
        let resp = self
            .request(Method::POST, "_bulk")
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|e| LoadError::BulkWrite(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LoadError::BulkWrite(format!(
                "Bulk request failed with status {status}: {body}"
            ))
            .into());
        }

        let response: BulkResponse = resp
            .json()
            .await
            .map_err(|e| LoadError::BulkWrite(format!("Invalid bulk response: {e}")))?;

        let mut result = BulkWriteResult::default();
        for item in response.items.iter().flat_map(|entry| entry.values()) {
            if item.is_success() {
                result.indexed += 1;
            } else {
                result.failures.push(item.to_failure());
            }
        }

        if response.errors && result.failures.is_empty() {
            tracing::warn!("Bulk response flagged errors but no failed items were reported");
        }

        Ok(result)
    }

    async fn refresh(&self, index: &IndexName) -> Result<()> {
        let resp = self
            .request(Method::POST, &format!("{index}/_refresh"))
            .send()
            .await
            .map_err(|e| LoadError::BulkWrite(format!("Refresh failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(LoadError::BulkWrite(format!(
                "Refresh of '{index}' returned status {}",
                resp.status()
            ))
            .into());
        }
        Ok(())
    }

    async fn count(&self, index: &IndexName) -> Result<u64> {
        let resp = self
            .request(Method::GET, &format!("{index}/_count"))
            .send()
            .await
            .map_err(|e| LoadError::IndexConnection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(LoadError::Schema(format!(
                "Counting documents in '{index}' returned status {}",
                resp.status()
            ))
            .into());
        }

        let count: CountResponse = resp
            .json()
            .await
            .map_err(|e| TrackliftError::Serialization(format!("Invalid count response: {e}")))?;
        Ok(count.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::ids::DocumentId;
    use serde_json::Map;

    fn config(url: &str) -> IndexConfig {
        IndexConfig {
            url: url.to_string(),
            timeout_seconds: 5,
            ..IndexConfig::default()
        }
    }

    fn document(position: usize, age: i64) -> IndexDocument {
        let mut source = Map::new();
        source.insert("age".to_string(), json!(age));
        IndexDocument {
            id: DocumentId::from_position(position),
            source,
        }
    }

    #[test]
    fn test_auth_header_value() {
        let mut cfg = config("http://localhost:9200/");
        let client = SearchClient::new(&cfg).unwrap();
        assert!(client.auth_header_value().is_none());
        assert_eq!(client.base_url(), "http://localhost:9200");

        cfg.username = Some("elastic".to_string());
        cfg.password = Some(secret_string("changeme".to_string()));
        let client = SearchClient::new(&cfg).unwrap();
        assert_eq!(
            client.auth_header_value().as_deref(),
            Some("Basic ZWxhc3RpYzpjaGFuZ2VtZQ==")
        );
    }

    #[test]
    fn test_bulk_body_is_ndjson() {
        let index = IndexName::new("music_streaming_data").unwrap();
        let body = bulk_body(&index, &[document(0, 40), document(1, 22)]).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            r#"{"index":{"_id":"1","_index":"music_streaming_data"}}"#
        );
        assert_eq!(lines[1], r#"{"age":40}"#);
        assert!(lines[2].contains(r#""_id":"2""#));
        assert!(body.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_ping_unreachable() {
        let client = SearchClient::new(&config("http://127.0.0.1:1")).unwrap();
        let err = client.ping().await.unwrap_err();
        assert!(err.is_connection_error());
    }
}
