//! Deduplication and null handling

use crate::core::artifact::{Cell, ColumnType, Table};
use crate::domain::Result;
use std::collections::HashSet;

/// Placeholder for missing text values
pub const UNKNOWN_TEXT: &str = "unknown";

/// Collapses fully identical rows, keeping the first occurrence
pub fn deduplicate(table: Table) -> Result<Table> {
    let (columns, rows) = table.into_parts();
    let mut seen = HashSet::with_capacity(rows.len());
    let mut unique = Vec::with_capacity(rows.len());

    for row in rows {
        if seen.contains(&row) {
            continue;
        }
        seen.insert(row.clone());
        unique.push(row);
    }

    Table::new(columns, unique)
}

/// Replaces nulls according to the column type
///
/// Text becomes `unknown`, integers become `0`, floats become `0.0`.
pub fn fill_nulls(table: Table) -> Result<Table> {
    let (columns, mut rows) = table.into_parts();

    for row in &mut rows {
        for (cell, column) in row.iter_mut().zip(&columns) {
            if cell.is_null() {
                *cell = match column.kind {
                    ColumnType::Text => Cell::from(UNKNOWN_TEXT),
                    ColumnType::Int => Cell::Int(0),
                    ColumnType::Float => Cell::Float(0.0),
                };
            }
        }
    }

    Table::new(columns, rows)
}

/// Number of null cells in the table
pub fn count_nulls(table: &Table) -> usize {
    table
        .rows()
        .iter()
        .flat_map(|row| row.iter())
        .filter(|cell| cell.is_null())
        .count()
}
