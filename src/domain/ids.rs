//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that flow through a pipeline run.
//! Each type validates its format on construction so downstream code can
//! embed the value in SQL statements or URLs without re-checking it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Source table name newtype wrapper
///
/// Accepts a plain or schema-qualified SQL identifier
/// (`table_m3`, `public.table_m3`). Only ASCII letters, digits and
/// underscores are allowed in each part.
///
/// # Examples
///
/// ```
/// use tracklift::domain::ids::TableName;
/// use std::str::FromStr;
///
/// let table = TableName::from_str("public.table_m3").unwrap();
/// assert_eq!(table.quoted(), "\"public\".\"table_m3\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName(String);

impl TableName {
    /// Creates a new TableName from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(TableName)` if the name is a valid identifier, `Err` otherwise
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Table name cannot be empty".to_string());
        }

        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > 2 {
            return Err(format!(
                "Invalid table name '{name}'. Expected 'table' or 'schema.table'"
            ));
        }

        for part in &parts {
            let mut chars = part.chars();
            let valid_start = chars
                .next()
                .map(|c| c.is_ascii_alphabetic() || c == '_')
                .unwrap_or(false);
            if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(format!(
                    "Invalid table name '{name}'. Identifiers may only contain letters, digits and underscores"
                ));
            }
        }

        Ok(Self(name))
    }

    /// Returns the table name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with each part double-quoted for use in SQL
    pub fn quoted(&self) -> String {
        self.0
            .split('.')
            .map(|part| format!("\"{part}\""))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TableName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Search index name newtype wrapper
///
/// Follows the Elasticsearch naming rules: lowercase, no spaces or
/// `\ / * ? " < > | , #`, must not start with `-`, `_` or `+`, and
/// cannot be `.` or `..`.
///
/// # Examples
///
/// ```
/// use tracklift::domain::ids::IndexName;
/// use std::str::FromStr;
///
/// assert!(IndexName::from_str("music_streaming_data").is_ok());
/// assert!(IndexName::from_str("Music").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexName(String);

impl IndexName {
    /// Creates a new IndexName from a string
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.is_empty() {
            return Err("Index name cannot be empty".to_string());
        }
        if name == "." || name == ".." {
            return Err(format!("Invalid index name '{name}'"));
        }
        if name.starts_with(['-', '_', '+']) {
            return Err(format!(
                "Invalid index name '{name}'. Must not start with '-', '_' or '+'"
            ));
        }
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(format!("Invalid index name '{name}'. Must be lowercase"));
        }
        const FORBIDDEN: [char; 11] = [' ', '\\', '/', '*', '?', '"', '<', '>', '|', ',', '#'];
        if name.contains(FORBIDDEN) {
            return Err(format!(
                "Invalid index name '{name}'. Contains a forbidden character"
            ));
        }
        Ok(Self(name))
    }

    /// Returns the index name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IndexName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for IndexName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Index document identifier
///
/// The 1-based position of a record in the canonical artifact. Using the
/// position as `_id` makes a reload of the same artifact overwrite the
/// documents it wrote before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Creates a document id from a 1-based sequence number
    pub fn new(sequence: u64) -> Result<Self, String> {
        if sequence == 0 {
            return Err("Document sequence numbers start at 1".to_string());
        }
        Ok(Self(sequence))
    }

    /// Creates a document id from a 0-based row position
    pub fn from_position(position: usize) -> Self {
        Self(position as u64 + 1)
    }

    /// Returns the sequence number
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pipeline run identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a fresh random run id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_valid() {
        let table = TableName::from_str("table_m3").unwrap();
        assert_eq!(table.as_str(), "table_m3");
        assert_eq!(table.quoted(), "\"table_m3\"");
    }

    #[test]
    fn test_table_name_schema_qualified() {
        let table = TableName::from_str("analytics.listeners").unwrap();
        assert_eq!(table.quoted(), "\"analytics\".\"listeners\"");
    }

    #[test]
    fn test_table_name_rejects_injection() {
        assert!(TableName::from_str("table_m3; DROP TABLE x").is_err());
        assert!(TableName::from_str("\"quoted\"").is_err());
        assert!(TableName::from_str("a.b.c").is_err());
        assert!(TableName::from_str("1table").is_err());
        assert!(TableName::from_str("").is_err());
        assert!(TableName::from_str("schema.").is_err());
    }

    #[test]
    fn test_index_name_rules() {
        assert!(IndexName::from_str("music_streaming_data").is_ok());
        assert!(IndexName::from_str("listeners-2024").is_ok());
        assert!(IndexName::from_str("Listeners").is_err());
        assert!(IndexName::from_str("_hidden").is_err());
        assert!(IndexName::from_str("with space").is_err());
        assert!(IndexName::from_str("a/b").is_err());
        assert!(IndexName::from_str("..").is_err());
        assert!(IndexName::from_str("").is_err());
    }

    #[test]
    fn test_document_id_from_position() {
        assert_eq!(DocumentId::from_position(0).value(), 1);
        assert_eq!(DocumentId::from_position(41).to_string(), "42");
    }

    #[test]
    fn test_document_id_rejects_zero() {
        assert!(DocumentId::new(0).is_err());
        assert_eq!(DocumentId::new(7).unwrap().value(), 7);
    }

    #[test]
    fn test_run_id_unique() {
        assert_ne!(RunId::generate(), RunId::generate());
    }
}
