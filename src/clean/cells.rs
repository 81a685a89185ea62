//! Cell text normalization

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CellValue, Table};

use super::CleanStats;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Strings that stand for "no data", compared case-insensitively
pub const SENTINELS: [&str; 3] = ["null", "unknown", "error"];

/// Trim, collapse internal whitespace, and map sentinels to missing.
/// Non-text cells are returned unchanged.
pub fn normalize_cell(cell: CellValue) -> CellValue {
    let text = match cell {
        CellValue::String(text) => text,
        other => return other,
    };

    let collapsed = WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned();
    if is_sentinel(&collapsed) {
        return CellValue::Null;
    }
    CellValue::String(collapsed)
}

pub fn is_sentinel(s: &str) -> bool {
    SENTINELS.iter().any(|sentinel| s.eq_ignore_ascii_case(sentinel))
}

/// Normalize every cell of the table in place
pub fn normalize_cells(table: &mut Table, stats: &mut CleanStats) {
    let mut sentinels = 0;
    for row in &mut table.rows {
        for cell in &mut row.cells {
            let was_text = matches!(cell, CellValue::String(_));
            let normalized = normalize_cell(std::mem::replace(cell, CellValue::Null));
            if was_text && normalized.is_null() {
                sentinels += 1;
            }
            *cell = normalized;
        }
    }

    if sentinels > 0 {
        tracing::debug!(sentinels, "replaced sentinel strings with missing values");
    }
    stats.sentinels_replaced += sentinels;
}
