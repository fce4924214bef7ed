//! Fixed index schema and the record-to-document mapping

use crate::adapters::backend::traits::IndexDocument;
use crate::core::artifact::{format_float, parse_float, parse_int, Cell, Table};
use crate::domain::ids::DocumentId;
use serde_json::{json, Map, Value};

/// Index field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Keyword,
    Integer,
    Float,
}

impl FieldType {
    /// Type name used in the index mapping
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Keyword => "keyword",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
        }
    }
}

/// Every field the index knows about
pub const INDEX_FIELDS: [(&str, FieldType); 13] = [
    ("age", FieldType::Integer),
    ("country", FieldType::Keyword),
    ("streaming_platform", FieldType::Keyword),
    ("top_genre", FieldType::Keyword),
    ("minutes_streamed_per_day", FieldType::Integer),
    ("number_of_songs_liked", FieldType::Integer),
    ("most_played_artist", FieldType::Keyword),
    ("subscription_type", FieldType::Keyword),
    ("listening_time", FieldType::Keyword),
    ("discover_engagement", FieldType::Float),
    ("repeat_rate", FieldType::Float),
    ("age_group", FieldType::Keyword),
    ("region", FieldType::Keyword),
];

/// Type of a schema field
pub fn field_type(name: &str) -> Option<FieldType> {
    INDEX_FIELDS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, kind)| *kind)
}

/// Body of the index creation request
pub fn index_mapping() -> Value {
    let properties: Map<String, Value> = INDEX_FIELDS
        .iter()
        .map(|(name, kind)| (name.to_string(), json!({ "type": kind.as_str() })))
        .collect();

    json!({ "mappings": { "properties": properties } })
}

/// Converts a cell to the JSON value for a field type
///
/// A value that cannot be represented in the field type is sent unchanged
/// as a string; the index rejects that document individually.
pub fn field_value(cell: &Cell, kind: FieldType) -> Value {
    match (kind, cell) {
        (_, Cell::Null) => Value::Null,
        (FieldType::Keyword, Cell::Float(v)) => Value::String(format_float(*v)),
        (FieldType::Keyword, other) => Value::String(other.to_string()),
        (FieldType::Integer, Cell::Int(v)) => json!(v),
        (FieldType::Integer, Cell::Float(v)) if v.fract() == 0.0 && v.is_finite() => {
            json!(*v as i64)
        }
        (FieldType::Integer, Cell::Text(s)) => {
            parse_int(s).map(|v| json!(v)).unwrap_or_else(|| json!(s))
        }
        (FieldType::Float, Cell::Float(v)) => json!(v),
        (FieldType::Float, Cell::Int(v)) => json!(*v as f64),
        (FieldType::Float, Cell::Text(s)) => {
            parse_float(s).map(|v| json!(v)).unwrap_or_else(|| json!(s))
        }
        (_, other) => Value::String(other.to_string()),
    }
}

/// Builds one document per row, `_id` being the 1-based row position
///
/// Columns outside the schema are skipped.
pub fn build_documents(table: &Table) -> Vec<IndexDocument> {
    let fields: Vec<(usize, &str, FieldType)> = table
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(index, column)| {
            field_type(&column.name).map(|kind| (index, column.name.as_str(), kind))
        })
        .collect();

    let skipped: Vec<&str> = table
        .column_names()
        .into_iter()
        .filter(|name| field_type(name).is_none())
        .collect();
    if !skipped.is_empty() {
        tracing::debug!(columns = ?skipped, "Columns outside the index schema are not loaded");
    }

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(position, row)| {
            let source = fields
                .iter()
                .map(|(index, name, kind)| (name.to_string(), field_value(&row[*index], *kind)))
                .collect();
            IndexDocument {
                id: DocumentId::from_position(position),
                source,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::artifact::{Column, ColumnType};

    #[test]
    fn test_index_mapping_has_every_field() {
        let mapping = index_mapping();
        let properties = mapping["mappings"]["properties"].as_object().unwrap();

        assert_eq!(properties.len(), 13);
        assert_eq!(properties["age"]["type"], "integer");
        assert_eq!(properties["country"]["type"], "keyword");
        assert_eq!(properties["repeat_rate"]["type"], "float");
        assert_eq!(properties["region"]["type"], "keyword");
    }

    #[test]
    fn test_field_value_conversion() {
        assert_eq!(field_value(&Cell::Int(40), FieldType::Integer), json!(40));
        assert_eq!(field_value(&Cell::Float(40.0), FieldType::Integer), json!(40));
        assert_eq!(field_value(&Cell::from("34"), FieldType::Integer), json!(34));
        assert_eq!(field_value(&Cell::Int(1), FieldType::Float), json!(1.0));
        assert_eq!(field_value(&Cell::Float(0.2), FieldType::Float), json!(0.2));
        assert_eq!(field_value(&Cell::Int(7), FieldType::Keyword), json!("7"));
        assert_eq!(field_value(&Cell::from("night"), FieldType::Keyword), json!("night"));
        assert_eq!(field_value(&Cell::from("n/a"), FieldType::Integer), json!("n/a"));
        assert_eq!(field_value(&Cell::Null, FieldType::Keyword), Value::Null);
    }

    #[test]
    fn test_build_documents_positions_and_projection() {
        let table = Table::new(
            vec![
                Column::new("age", ColumnType::Int),
                Column::new("region", ColumnType::Text),
                Column::new("favourite_colour", ColumnType::Text),
            ],
            vec![
                vec![Cell::Int(40), Cell::from("north_america"), Cell::from("red")],
                vec![Cell::Int(22), Cell::from("asia"), Cell::from("blue")],
            ],
        )
        .unwrap();

        let documents = build_documents(&table);
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id.value(), 1);
        assert_eq!(documents[1].id.value(), 2);
        assert_eq!(documents[0].source["age"], json!(40));
        assert_eq!(documents[1].source["region"], json!("asia"));
        assert!(!documents[0].source.contains_key("favourite_colour"));
    }
}
