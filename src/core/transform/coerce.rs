//! Strict numeric typing for the fields the index maps as numbers

use crate::core::artifact::{parse_float, parse_int, Cell, ColumnType, Table};
use crate::domain::{Result, TransformError};

/// Columns cast to strict types, in the order they are processed
pub const NUMERIC_COLUMNS: [(&str, ColumnType); 5] = [
    ("age", ColumnType::Int),
    ("minutes_streamed_per_day", ColumnType::Int),
    ("number_of_songs_liked", ColumnType::Int),
    ("discover_engagement", ColumnType::Float),
    ("repeat_rate", ColumnType::Float),
];

/// Casts the numeric columns; columns absent from the table are skipped
///
/// # Errors
///
/// [`TransformError::TypeCoercion`] for the first value that cannot be cast.
pub fn coerce_types(table: Table) -> Result<Table> {
    let (mut columns, mut rows) = table.into_parts();

    for (name, target) in NUMERIC_COLUMNS {
        let Some(index) = columns.iter().position(|c| c.name == name) else {
            continue;
        };

        for (position, row) in rows.iter_mut().enumerate() {
            let cell = std::mem::replace(&mut row[index], Cell::Null);
            row[index] = coerce_cell(cell, target).map_err(|value| TransformError::TypeCoercion {
                column: name.to_string(),
                row: position + 1,
                value,
                target: target.as_str(),
            })?;
        }
        columns[index].kind = target;
    }

    Table::new(columns, rows)
}

/// Casts one cell, returning the offending rendering on failure
fn coerce_cell(cell: Cell, target: ColumnType) -> std::result::Result<Cell, String> {
    match target {
        ColumnType::Int => match cell {
            Cell::Int(v) => Ok(Cell::Int(v)),
            Cell::Float(v) => float_to_int(v).map(Cell::Int).ok_or_else(|| cell.to_string()),
            Cell::Text(ref s) => parse_int(s)
                .or_else(|| parse_float(s).and_then(float_to_int))
                .map(Cell::Int)
                .ok_or_else(|| s.clone()),
            Cell::Null => Err(String::new()),
        },
        ColumnType::Float => match cell {
            Cell::Int(v) => Ok(Cell::Float(v as f64)),
            Cell::Float(v) if v.is_finite() => Ok(Cell::Float(v)),
            Cell::Text(ref s) => parse_float(s).map(Cell::Float).ok_or_else(|| s.clone()),
            other => Err(other.to_string()),
        },
        ColumnType::Text => Ok(cell),
    }
}

/// Truncates toward zero; `None` for NaN, infinities and out-of-range values
///
/// A fractional age such as `17.5` has already been bucketed as `<18` by the
/// time it is cast here, and is stored as `17`.
fn float_to_int(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
    (value.is_finite() && in_range).then_some(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::artifact::Column;
    use crate::domain::TrackliftError;

    fn single(name: &str, kind: ColumnType, cell: Cell) -> Table {
        Table::new(vec![Column::new(name, kind)], vec![vec![cell]]).unwrap()
    }

    #[test]
    fn test_coerce_integer_text() {
        let output = coerce_types(single("age", ColumnType::Text, Cell::from("34"))).unwrap();
        assert_eq!(output.get(0, "age"), Some(&Cell::Int(34)));
        assert_eq!(output.columns()[0].kind, ColumnType::Int);
    }

    #[test]
    fn test_coerce_whole_float_to_int() {
        let output = coerce_types(single(
            "minutes_streamed_per_day",
            ColumnType::Float,
            Cell::Float(120.0),
        ))
        .unwrap();
        assert_eq!(output.get(0, "minutes_streamed_per_day"), Some(&Cell::Int(120)));
    }

    #[test]
    fn test_coerce_fractional_values_truncate() {
        let output = coerce_types(single(
            "number_of_songs_liked",
            ColumnType::Float,
            Cell::Float(12.5),
        ))
        .unwrap();
        assert_eq!(output.get(0, "number_of_songs_liked"), Some(&Cell::Int(12)));

        let output = coerce_types(single(
            "minutes_streamed_per_day",
            ColumnType::Text,
            Cell::from("120.7"),
        ))
        .unwrap();
        assert_eq!(output.get(0, "minutes_streamed_per_day"), Some(&Cell::Int(120)));

        let output = coerce_types(single("age", ColumnType::Float, Cell::Float(-0.9))).unwrap();
        assert_eq!(output.get(0, "age"), Some(&Cell::Int(0)));
    }

    #[test]
    fn test_coerce_non_finite_fails() {
        let result = coerce_types(single("age", ColumnType::Float, Cell::Float(f64::NAN)));
        assert!(matches!(
            result,
            Err(TrackliftError::Transform(TransformError::TypeCoercion { .. }))
        ));
    }

    #[test]
    fn test_coerce_float_columns() {
        let output = coerce_types(single(
            "discover_engagement",
            ColumnType::Text,
            Cell::from("55.5"),
        ))
        .unwrap();
        assert_eq!(output.get(0, "discover_engagement"), Some(&Cell::Float(55.5)));

        let output = coerce_types(single("repeat_rate", ColumnType::Int, Cell::Int(1))).unwrap();
        assert_eq!(output.get(0, "repeat_rate"), Some(&Cell::Float(1.0)));
    }

    #[test]
    fn test_coerce_non_numeric_residual() {
        let err = coerce_types(single("age", ColumnType::Text, Cell::from("unknown"))).unwrap_err();
        match err {
            TrackliftError::Transform(TransformError::TypeCoercion {
                column,
                row,
                value,
                target,
            }) => {
                assert_eq!(column, "age");
                assert_eq!(row, 1);
                assert_eq!(value, "unknown");
                assert_eq!(target, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_coerce_skips_absent_columns() {
        let table = single("country", ColumnType::Text, Cell::from("usa"));
        assert_eq!(coerce_types(table.clone()).unwrap(), table);
    }

    #[test]
    fn test_float_to_int() {
        assert_eq!(float_to_int(40.0), Some(40));
        assert_eq!(float_to_int(40.5), Some(40));
        assert_eq!(float_to_int(-3.7), Some(-3));
        assert_eq!(float_to_int(f64::INFINITY), None);
        assert_eq!(float_to_int(f64::NAN), None);
        assert_eq!(float_to_int(1e30), None);
    }
}
