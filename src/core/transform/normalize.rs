//! Text and column-name normalization steps

use crate::core::artifact::{Cell, ColumnType, Table};
use crate::domain::{Result, TrackliftError};
use std::collections::HashSet;

/// Identifier column that is not needed downstream
pub const IDENTIFIER_COLUMN: &str = "user_id";

/// Engagement-rate columns and their canonical names
pub const RENAMED_COLUMNS: [(&str, &str); 2] = [
    ("discover_weekly_engagement", "discover_engagement"),
    ("repeat_song_rate", "repeat_rate"),
];

/// Free-text listening-time column
pub const LISTENING_TIME_COLUMN: &str = "listening_time";

/// Lowercases and trims every text cell
///
/// A text cell that is blank after trimming becomes null.
pub fn normalize_text(table: Table) -> Result<Table> {
    let (columns, rows) = table.into_parts();
    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Cell::Text(s) => {
                        let normalized = s.trim().to_lowercase();
                        if normalized.is_empty() {
                            Cell::Null
                        } else {
                            Cell::Text(normalized)
                        }
                    }
                    other => other,
                })
                .collect()
        })
        .collect();
    Table::new(columns, rows)
}

/// Normalizes a single column name
///
/// Lowercase, trimmed, trailing `(%)` removed, spaces turned into underscores.
pub fn normalize_column_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stripped = lowered.strip_suffix("(%)").unwrap_or(&lowered).trim_end();
    stripped.replace(' ', "_")
}

/// Normalizes every column name
///
/// # Errors
///
/// Fails if two columns end up with the same name.
pub fn normalize_column_names(table: Table) -> Result<Table> {
    let (mut columns, rows) = table.into_parts();
    let mut seen = HashSet::new();

    for column in &mut columns {
        column.name = normalize_column_name(&column.name);
        if !seen.insert(column.name.clone()) {
            return Err(TrackliftError::Artifact(format!(
                "Duplicate column '{}' after name normalization",
                column.name
            )));
        }
    }

    Table::new(columns, rows)
}

/// Drops the identifier column when present
pub fn drop_identifier(table: Table) -> Result<Table> {
    drop_column(table, IDENTIFIER_COLUMN)
}

/// Renames the engagement-rate columns; absent columns are skipped
pub fn rename_columns(table: Table) -> Result<Table> {
    let (mut columns, rows) = table.into_parts();
    for column in &mut columns {
        if let Some((_, to)) = RENAMED_COLUMNS.iter().find(|(from, _)| *from == column.name) {
            column.name = (*to).to_string();
        }
    }
    Table::new(columns, rows)
}

/// Keeps `listening_time` as lowercased free text
pub fn normalize_listening_time(table: Table) -> Result<Table> {
    let Some(index) = table.column_index(LISTENING_TIME_COLUMN) else {
        return Ok(table);
    };

    let (columns, mut rows) = table.into_parts();
    if columns[index].kind == ColumnType::Text {
        for row in &mut rows {
            if let Cell::Text(s) = &mut row[index] {
                *s = s.to_lowercase();
            }
        }
    }
    Table::new(columns, rows)
}

/// Removes a column by name; a missing column is left alone
pub fn drop_column(table: Table, name: &str) -> Result<Table> {
    let Some(index) = table.column_index(name) else {
        return Ok(table);
    };

    let (mut columns, mut rows) = table.into_parts();
    columns.remove(index);
    for row in &mut rows {
        row.remove(index);
    }
    Table::new(columns, rows)
}
