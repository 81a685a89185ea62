//! Cleaning pipeline for tables
//!
//! The pipeline runs four stages in a fixed order, each one consuming the
//! previous stage's output:
//!
//! 1. column names are stripped, de-duplicated and sanitized
//! 2. text cells are trimmed, whitespace-collapsed and sentinel-mapped
//! 3. text columns are re-typed as dates or numbers where they fit
//! 4. empty columns, duplicate rows and incomplete rows are removed

pub mod cells;
pub mod dates;
pub mod infer;
pub mod names;
pub mod prune;

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};
use crate::model::Table;

pub use cells::normalize_cells;
pub use infer::{infer_column_types, DATE_PARSE_THRESHOLD};
pub use names::normalize_column_names;
pub use prune::prune;

/// Counts of what each stage changed
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanStats {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    pub duplicate_columns_dropped: usize,
    pub columns_renamed: usize,
    pub sentinels_replaced: usize,
    pub date_columns: usize,
    pub numeric_columns: usize,
    pub date_cells_coerced_to_missing: usize,
    pub empty_columns_dropped: usize,
    pub duplicate_rows_dropped: usize,
    pub incomplete_rows_dropped: usize,
}

impl CleanStats {
    /// Cleaning left no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.rows_after == 0 || self.columns_after == 0
    }
}

/// Clean a table
pub fn clean(table: Table) -> Result<Table> {
    clean_with_stats(table).map(|(table, _)| table)
}

/// Clean a table and report what changed
pub fn clean_with_stats(mut table: Table) -> Result<(Table, CleanStats)> {
    validate_shape(&table)?;

    let mut stats = CleanStats {
        rows_before: table.row_count(),
        columns_before: table.column_count(),
        ..Default::default()
    };

    normalize_column_names(&mut table, &mut stats);
    normalize_cells(&mut table, &mut stats);
    infer_column_types(&mut table, &mut stats);
    prune(&mut table, &mut stats);

    stats.rows_after = table.row_count();
    stats.columns_after = table.column_count();

    if stats.is_empty() {
        tracing::warn!(table = %table.name, "cleaning left an empty table");
    } else {
        tracing::debug!(
            table = %table.name,
            rows = stats.rows_after,
            columns = stats.columns_after,
            "cleaned table"
        );
    }

    Ok((table, stats))
}

/// Every row must hold exactly one cell per column
fn validate_shape(table: &Table) -> Result<()> {
    let width = table.column_count();
    if let Some(row) = table.rows.iter().find(|row| row.cells.len() != width) {
        return Err(CleanError::unhandled(
            table.name.clone(),
            format!(
                "row at line {} has {} cells, expected {}",
                row.source_line,
                row.cells.len(),
                width
            ),
        ));
    }
    Ok(())
}
