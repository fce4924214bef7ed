//! CSV encoding of artifacts
//!
//! Artifacts are comma-separated with a header row. Column types are not
//! stored; they are inferred when an artifact is read back:
//!
//! - every non-empty value parses as an integer: [`ColumnType::Int`]
//! - every non-empty value parses as a float: [`ColumnType::Float`]
//! - anything else: [`ColumnType::Text`]
//! - no non-empty value at all: [`ColumnType::Float`]
//!
//! Empty fields become [`Cell::Null`]. Floats are always written with a
//! fractional part so a float column never reads back as integers.

use super::table::{parse_float, parse_int, Cell, Column, ColumnType, Table};
use crate::domain::{Result, TrackliftError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads a CSV artifact from disk
pub fn read_table(path: &Path) -> Result<Table> {
    let file = fs::File::open(path).map_err(|e| {
        TrackliftError::Artifact(format!("Failed to open artifact {}: {}", path.display(), e))
    })?;
    parse_table(file)
}

/// Parses CSV with a header row into a typed table
pub fn parse_table<R: io::Read>(reader: R) -> Result<Table> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let kinds: Vec<ColumnType> = (0..headers.len())
        .map(|index| infer_column_type(raw_rows.iter().map(|row| row[index].as_str())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&kinds)
                .map(|(value, kind)| decode_cell(value, *kind))
                .collect()
        })
        .collect();

    let columns = headers
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column::new(name, kind))
        .collect();

    Table::new(columns, rows)
}

/// Writes a table as a CSV artifact
///
/// The data goes to a sibling temporary file first and is renamed into
/// place, so readers never observe a half-written artifact.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temporary_path(path);
    let result = fs::File::create(&tmp_path)
        .map_err(TrackliftError::from)
        .and_then(|file| encode_table(table, file))
        .and_then(|_| fs::rename(&tmp_path, path).map_err(TrackliftError::from));

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Encodes a table as CSV into any writer
pub fn encode_table<W: io::Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = ::csv::Writer::from_writer(writer);

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(Cell::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

/// Removes an artifact left behind by a previous run
///
/// Returns true if a file was removed. A missing file is not an error.
pub fn remove_artifact(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TrackliftError::Artifact(format!(
            "Failed to remove stale artifact {}: {}",
            path.display(),
            e
        ))),
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "artifact".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}

fn infer_column_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let present: Vec<&str> = values.filter(|v| !v.is_empty()).collect();
    if present.is_empty() {
        return ColumnType::Float;
    }

    if present.iter().all(|v| parse_int(v).is_some()) {
        ColumnType::Int
    } else if present.iter().all(|v| parse_float(v).is_some()) {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

fn decode_cell(value: String, kind: ColumnType) -> Cell {
    if value.is_empty() {
        return Cell::Null;
    }

    match kind {
        ColumnType::Int => parse_int(&value).map(Cell::Int).unwrap_or(Cell::Text(value)),
        ColumnType::Float => parse_float(&value)
            .map(Cell::Float)
            .unwrap_or(Cell::Text(value)),
        ColumnType::Text => Cell::Text(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_infers_column_types() {
        let csv = "age,Country,repeat_rate,notes\n40,USA,0.2,\n22,Japan,1,\n";
        let table = parse_table(csv.as_bytes()).unwrap();

        let kinds: Vec<ColumnType> = table.columns().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnType::Int,
                ColumnType::Text,
                ColumnType::Float,
                ColumnType::Float
            ]
        );
        assert_eq!(table.get(0, "age"), Some(&Cell::Int(40)));
        assert_eq!(table.get(1, "repeat_rate"), Some(&Cell::Float(1.0)));
        assert_eq!(table.get(0, "notes"), Some(&Cell::Null));
    }

    #[test]
    fn test_parse_mixed_column_is_text() {
        let csv = "age\n34\nunknown\n";
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.columns()[0].kind, ColumnType::Text);
        assert_eq!(table.get(0, "age"), Some(&Cell::from("34")));
    }

    #[test]
    fn test_parse_rejects_ragged_csv() {
        let csv = "a,b\n1,2\n3\n";
        assert!(parse_table(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_write_keeps_float_columns_float() {
        let table = Table::new(
            vec![
                Column::new("discover_engagement", ColumnType::Float),
                Column::new("listening_time", ColumnType::Text),
            ],
            vec![vec![Cell::Float(40.0), Cell::from("night, late")]],
        )
        .unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("clean.csv");
        write_table(&table, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("40.0,\"night, late\""));

        let read_back = read_table(&path).unwrap();
        assert_eq!(read_back, table);
        assert!(!temporary_path(&path).exists());
    }

    #[test]
    fn test_remove_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.csv");

        assert!(!remove_artifact(&path).unwrap());
        fs::write(&path, "a\n1\n").unwrap();
        assert!(remove_artifact(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_read_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let result = read_table(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(TrackliftError::Artifact(_))));
    }
}
