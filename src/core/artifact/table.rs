//! In-memory tabular representation shared by every stage

use crate::domain::{Result, TrackliftError};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single value in a [`Table`]
#[derive(Debug, Clone)]
pub enum Cell {
    /// Missing value (SQL `NULL`, empty CSV field)
    Null,
    /// Free text
    Text(String),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
}

impl Cell {
    /// Returns true for [`Cell::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Borrows the text of a [`Cell::Text`]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell
    ///
    /// Text is parsed after trimming; non-finite results are rejected.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) if v.is_finite() => Some(*v),
            Cell::Text(s) => parse_float(s),
            _ => None,
        }
    }
}

// Floats compare by bit pattern so identical rows hash identically.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Null, Cell::Null) => true,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Int(a), Cell::Int(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Null => {}
            Cell::Text(s) => s.hash(state),
            Cell::Int(v) => v.hash(state),
            Cell::Float(v) => v.to_bits().hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Int,
    Float,
}

impl ColumnType {
    /// Lowercase name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Int => "integer",
            ColumnType::Float => "float",
        }
    }
}

/// Column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered columns plus ordered rows
///
/// Every row has exactly one cell per column; [`Table::new`] enforces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table, rejecting rows whose width differs from the header
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(TrackliftError::Artifact(format!(
                "Row {} has {} values, expected {}",
                index + 1,
                row.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of the named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cell at `row` in the named column
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let index = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// Splits the table into its parts
    pub fn into_parts(self) -> (Vec<Column>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }
}

/// Parses a finite float, tolerating surrounding whitespace
pub fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a signed integer, tolerating surrounding whitespace
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Renders a float so it reads back as a float (`40` becomes `40.0`)
pub fn format_float(value: f64) -> String {
    let rendered = value.to_string();
    if rendered.contains(['.', 'e', 'E']) || !value.is_finite() {
        rendered
    } else {
        format!("{rendered}.0")
    }
}
