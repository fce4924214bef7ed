//! Artifacts passed between pipeline stages
//!
//! A [`Table`] is the in-memory form; CSV files on disk are the hand-off
//! format between stages.

pub mod codec;
pub mod table;

pub use codec::{encode_table, parse_table, read_table, remove_artifact, write_table};
pub use table::{format_float, parse_float, parse_int, Cell, Column, ColumnType, Table};
