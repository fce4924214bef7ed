//! Search service API models
//!
//! Request and response bodies of the Elasticsearch-compatible REST API.
//! Only the fields Tracklift reads are modelled.

use crate::domain::DocumentFailure;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Response of `POST /_bulk`
#[derive(Debug, Deserialize)]
pub struct BulkResponse {
    /// True if at least one item failed
    #[serde(default)]
    pub errors: bool,

    /// One entry per action, keyed by the action name (`index`)
    #[serde(default)]
    pub items: Vec<HashMap<String, BulkItem>>,
}

/// Outcome of one bulk action
#[derive(Debug, Deserialize)]
pub struct BulkItem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    pub status: u16,

    #[serde(default)]
    pub error: Option<ErrorCause>,
}

impl BulkItem {
    /// True for 2xx item statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a rejected item into a failure record
    pub fn to_failure(&self) -> DocumentFailure {
        let reason = self
            .error
            .as_ref()
            .map(ErrorCause::describe)
            .unwrap_or_else(|| format!("status {}", self.status));
        DocumentFailure::new(
            self.id.clone().unwrap_or_else(|| "unknown".to_string()),
            self.status,
            reason,
        )
    }
}

/// Error object returned by the service
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorCause {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub reason: Option<String>,
}

impl ErrorCause {
    /// `type: reason`, or just the type
    pub fn describe(&self) -> String {
        match &self.reason {
            Some(reason) => format!("{}: {}", self.kind, reason),
            None => self.kind.clone(),
        }
    }
}

/// Top-level error body (`{"error": {...}, "status": 400}`)
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Value,
}

impl ErrorResponse {
    /// Error type, when the body carries a structured error
    pub fn error_type(&self) -> Option<&str> {
        self.error.get("type").and_then(Value::as_str)
    }
}

/// Response of `GET /<index>/_count`
#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}
