//! Derived fields: `age_group` and `region`

use crate::core::artifact::{Cell, Column, ColumnType, Table};
use crate::domain::{Result, TransformError};

pub const AGE_COLUMN: &str = "age";
pub const AGE_GROUP_COLUMN: &str = "age_group";
pub const COUNTRY_COLUMN: &str = "country";
pub const REGION_COLUMN: &str = "region";

/// Region assigned to any country missing from [`REGIONS`]
pub const OTHER_REGION: &str = "other";

/// Age bin labels, in bin order
pub const AGE_GROUPS: [&str; 5] = ["<18", "18-25", "26-35", "36-50", "50+"];

/// Bin edges; the first bin is `[0, 18)`, the others are right-closed
const AGE_EDGES: [f64; 6] = [0.0, 18.0, 25.0, 35.0, 50.0, 100.0];

/// Country to region lookup
pub const REGIONS: [(&str, &str); 10] = [
    ("japan", "asia"),
    ("south korea", "asia"),
    ("india", "asia"),
    ("australia", "oceania"),
    ("uk", "europe"),
    ("germany", "europe"),
    ("france", "europe"),
    ("brazil", "south_america"),
    ("canada", "north_america"),
    ("usa", "north_america"),
];

/// Label for an age, or `None` when outside `[0, 100]`
pub fn age_group(age: f64) -> Option<&'static str> {
    if !(AGE_EDGES[0]..=AGE_EDGES[5]).contains(&age) {
        return None;
    }
    if age < AGE_EDGES[1] {
        return Some(AGE_GROUPS[0]);
    }
    AGE_EDGES[2..]
        .iter()
        .position(|edge| age <= *edge)
        .map(|bin| AGE_GROUPS[bin + 1])
}

/// Region for a normalized country name
pub fn region_for(country: &str) -> &'static str {
    REGIONS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, region)| *region)
        .unwrap_or(OTHER_REGION)
}

/// Adds `age_group`, dropping rows whose age is null or out of range
///
/// # Errors
///
/// - [`TransformError::MissingColumn`] if there is no `age` column
/// - [`TransformError::TypeCoercion`] if an age is not numeric
pub fn bucket_age(table: Table) -> Result<Table> {
    let index = table
        .column_index(AGE_COLUMN)
        .ok_or_else(|| TransformError::MissingColumn(AGE_COLUMN.to_string()))?;

    let (columns, rows) = table.into_parts();
    let mut kept = Vec::with_capacity(rows.len());
    let mut groups = Vec::with_capacity(rows.len());

    for (position, row) in rows.into_iter().enumerate() {
        let cell = &row[index];
        if cell.is_null() {
            tracing::warn!(row = position + 1, "Dropping row with missing age");
            continue;
        }

        let age = cell.as_f64().ok_or_else(|| TransformError::TypeCoercion {
            column: AGE_COLUMN.to_string(),
            row: position + 1,
            value: cell.to_string(),
            target: ColumnType::Int.as_str(),
        })?;

        match age_group(age) {
            Some(group) => {
                groups.push(Cell::from(group));
                kept.push(row);
            }
            None => {
                tracing::warn!(row = position + 1, age, "Dropping row with out-of-range age");
            }
        }
    }

    set_column(columns, kept, AGE_GROUP_COLUMN, groups)
}

/// Adds `region` from `country`
///
/// # Errors
///
/// [`TransformError::MissingColumn`] if there is no `country` column
pub fn map_region(table: Table) -> Result<Table> {
    let index = table
        .column_index(COUNTRY_COLUMN)
        .ok_or_else(|| TransformError::MissingColumn(COUNTRY_COLUMN.to_string()))?;

    let regions = table
        .rows()
        .iter()
        .map(|row| Cell::from(row[index].as_text().map(region_for).unwrap_or(OTHER_REGION)))
        .collect();

    let (columns, rows) = table.into_parts();
    set_column(columns, rows, REGION_COLUMN, regions)
}

/// Appends a text column, replacing one with the same name
fn set_column(
    mut columns: Vec<Column>,
    mut rows: Vec<Vec<Cell>>,
    name: &str,
    values: Vec<Cell>,
) -> Result<Table> {
    match columns.iter().position(|c| c.name == name) {
        Some(index) => {
            columns[index].kind = ColumnType::Text;
            for (row, value) in rows.iter_mut().zip(values) {
                row[index] = value;
            }
        }
        None => {
            columns.push(Column::new(name, ColumnType::Text));
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }
    }
    Table::new(columns, rows)
}
