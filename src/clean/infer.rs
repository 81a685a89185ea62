//! Type inference for generic text columns
//!
//! Dates and numbers follow different commit policies. A column becomes a
//! date column when at least [`DATE_PARSE_THRESHOLD`] of its non-missing
//! cells parse, and the cells that do not parse become missing. A column
//! becomes numeric only when every non-missing cell parses; otherwise it is
//! left exactly as it was.

use chrono::{NaiveDateTime, NaiveTime};

use crate::model::{CellType, CellValue, Table};

use super::dates::parse_datetime;
use super::CleanStats;

/// Minimum share of parseable non-missing cells for a date conversion
pub const DATE_PARSE_THRESHOLD: f64 = 0.8;

/// Re-type every text column of the table
pub fn infer_column_types(table: &mut Table, stats: &mut CleanStats) {
    for idx in 0..table.column_count() {
        if !table.columns[idx].inferred_type.is_textual() {
            continue;
        }

        if try_convert_dates(table, idx, stats) {
            continue;
        }
        try_convert_numeric(table, idx, stats);
    }
}

/// Date-time value of a cell, if it has one
fn cell_datetime(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::String(s) => parse_datetime(s),
        CellValue::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        CellValue::DateTime(dt) => Some(*dt),
        _ => None,
    }
}

/// Whether `parsed` out of `total` non-missing cells clears the threshold
pub fn meets_date_threshold(parsed: usize, total: usize) -> bool {
    total > 0 && parsed as f64 / total as f64 >= DATE_PARSE_THRESHOLD
}

fn try_convert_dates(table: &mut Table, idx: usize, stats: &mut CleanStats) -> bool {
    // None = missing before the attempt, Some(None) = failed to parse
    let attempts: Vec<Option<Option<NaiveDateTime>>> = table
        .column_values(idx)
        .map(|cell| (!cell.is_null()).then(|| cell_datetime(cell)))
        .collect();

    let non_missing = attempts.iter().filter(|a| a.is_some()).count();
    let parsed = attempts.iter().filter(|a| matches!(a, Some(Some(_)))).count();
    if !meets_date_threshold(parsed, non_missing) {
        return false;
    }

    let date_only = attempts
        .iter()
        .flatten()
        .flatten()
        .all(|dt| dt.time() == NaiveTime::MIN);

    for (row, attempt) in table.rows.iter_mut().zip(attempts) {
        let value = match attempt.flatten() {
            Some(dt) if date_only => CellValue::Date(dt.date()),
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Null,
        };
        if let Some(cell) = row.cells.get_mut(idx) {
            *cell = value;
        }
    }

    let column = &mut table.columns[idx];
    column.inferred_type = if date_only { CellType::Date } else { CellType::DateTime };
    tracing::debug!(
        column = %column.name,
        parsed,
        non_missing,
        "converted column to {}",
        column.inferred_type
    );
    stats.date_columns += 1;
    stats.date_cells_coerced_to_missing += non_missing - parsed;
    true
}

/// Parse text as an integer, else as a finite float
fn parse_number(s: &str) -> Option<CellValue> {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(CellValue::Int(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(CellValue::Float)
}

/// Numeric form of every cell, or `None` if any non-missing cell is not a number
fn numeric_cells<'a>(cells: impl Iterator<Item = &'a CellValue>) -> Option<Vec<CellValue>> {
    cells
        .map(|cell| match cell {
            CellValue::Null => Some(CellValue::Null),
            CellValue::Int(_) | CellValue::Float(_) => Some(cell.clone()),
            CellValue::String(s) if s.trim().is_empty() => Some(CellValue::Null),
            CellValue::String(s) => parse_number(s),
            _ => None,
        })
        .collect()
}

fn try_convert_numeric(table: &mut Table, idx: usize, stats: &mut CleanStats) -> bool {
    let Some(values) = numeric_cells(table.column_values(idx)) else {
        return false;
    };
    if values.iter().all(CellValue::is_null) {
        return false;
    }

    let target = CellType::of_cells(&values);
    for (row, value) in table.rows.iter_mut().zip(values) {
        let value = match value {
            CellValue::Int(i) if target == CellType::Float => CellValue::Float(i as f64),
            other => other,
        };
        if let Some(cell) = row.cells.get_mut(idx) {
            *cell = value;
        }
    }

    let column = &mut table.columns[idx];
    column.inferred_type = target;
    tracing::debug!(column = %column.name, "converted column to {}", target);
    stats.numeric_columns += 1;
    true
}
