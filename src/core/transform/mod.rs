//! Cleaning and normalization of the staging artifact
//!
//! The transform is a fixed chain of pure steps, each taking a [`Table`] by
//! value and returning the next one:
//!
//! 1. [`normalize_text`] - lowercase and trim text cells
//! 2. [`normalize_column_names`] - `Discover Weekly Engagement (%)` becomes `discover_weekly_engagement`
//! 3. [`drop_identifier`] - remove `user_id`
//! 4. [`rename_columns`] - shorter engagement-rate names
//! 5. [`normalize_listening_time`] - lowercase free text
//! 6. [`bucket_age`] - derive `age_group`
//! 7. [`map_region`] - derive `region`
//! 8. [`deduplicate`] - collapse identical rows
//! 9. [`fill_nulls`] - `unknown` / `0` / `0.0`
//! 10. [`coerce_types`] - strict integer and float columns
//!
//! Any failing step aborts the whole transform and no canonical artifact is
//! written.
//!
//! # Example
//!
//! ```
//! use tracklift::core::artifact::parse_table;
//! use tracklift::core::transform::transform_table;
//!
//! # fn example() -> tracklift::domain::Result<()> {
//! let raw = parse_table("user_id,Age,Country\n5,40,USA\n".as_bytes())?;
//! let (canonical, report) = transform_table(raw)?;
//!
//! assert_eq!(canonical.column_names(), vec!["age", "country", "age_group", "region"]);
//! assert_eq!(report.output_rows, 1);
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod coerce;
pub mod derive;
pub mod normalize;

pub use clean::{count_nulls, deduplicate, fill_nulls};
pub use coerce::coerce_types;
pub use derive::{age_group, bucket_age, map_region, region_for};
pub use normalize::{
    drop_identifier, normalize_column_name, normalize_column_names, normalize_listening_time,
    normalize_text, rename_columns,
};

use crate::core::artifact::{self, Table};
use crate::domain::Result;
use crate::{log_stage_complete, log_stage_start};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Row accounting for one transform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// Rows in the staging artifact
    pub input_rows: usize,

    /// Rows dropped because age was missing or outside `[0, 100]`
    pub rows_dropped_age: usize,

    /// Rows removed as duplicates
    pub duplicates_removed: usize,

    /// Null cells replaced with a placeholder
    pub nulls_filled: usize,

    /// Rows in the canonical artifact
    pub output_rows: usize,

    /// Canonical column names, in order
    pub columns: Vec<String>,
}

/// Runs every step over an in-memory table
pub fn transform_table(table: Table) -> Result<(Table, TransformReport)> {
    let mut report = TransformReport {
        input_rows: table.len(),
        ..TransformReport::default()
    };

    let table = normalize_text(table)?;
    let table = normalize_column_names(table)?;
    let table = drop_identifier(table)?;
    let table = rename_columns(table)?;
    let table = normalize_listening_time(table)?;

    let before = table.len();
    let table = bucket_age(table)?;
    report.rows_dropped_age = before - table.len();

    let table = map_region(table)?;

    let before = table.len();
    let table = deduplicate(table)?;
    report.duplicates_removed = before - table.len();

    report.nulls_filled = count_nulls(&table);
    let table = fill_nulls(table)?;
    let table = coerce_types(table)?;

    report.output_rows = table.len();
    report.columns = table.column_names().iter().map(|c| c.to_string()).collect();

    Ok((table, report))
}

/// Reads the staging artifact, transforms it and writes the canonical artifact
///
/// The canonical path is cleared first, so a failed transform leaves nothing
/// behind for the loader to pick up.
pub fn run_transform(staging_path: &Path, canonical_path: &Path) -> Result<TransformReport> {
    let started = Instant::now();
    log_stage_start!("transform", staging_path.display());

    artifact::remove_artifact(canonical_path)?;

    let raw = artifact::read_table(staging_path)?;
    let (canonical, report) = transform_table(raw)?;
    artifact::write_table(&canonical, canonical_path)?;

    if report.rows_dropped_age > 0 {
        tracing::warn!(
            rows = report.rows_dropped_age,
            "Rows dropped for missing or out-of-range age"
        );
    }

    tracing::info!(
        input_rows = report.input_rows,
        duplicates_removed = report.duplicates_removed,
        nulls_filled = report.nulls_filled,
        output = %canonical_path.display(),
        "Canonical artifact written"
    );
    log_stage_complete!("transform", report.output_rows, started.elapsed());

    Ok(report)
}
