//! Removal of empty columns, duplicate rows and incomplete rows

use rustc_hash::FxHashSet;

use crate::model::{CellValue, Table};

use super::CleanStats;

/// Drop columns where every cell is missing
pub fn drop_empty_columns(table: &mut Table, stats: &mut CleanStats) {
    let keep: Vec<bool> = (0..table.column_count())
        .map(|idx| table.column_values(idx).any(|cell| !cell.is_null()))
        .collect();

    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        tracing::debug!(dropped, "dropping empty columns");
        table.retain_columns(&keep);
    }
    stats.empty_columns_dropped += dropped;
}

/// Keep the first occurrence of each distinct row
pub fn drop_duplicate_rows(table: &mut Table, stats: &mut CleanStats) {
    let before = table.row_count();
    let mut seen: FxHashSet<Vec<CellValue>> = FxHashSet::default();
    table.rows.retain(|row| seen.insert(row.cells.clone()));

    let dropped = before - table.row_count();
    if dropped > 0 {
        tracing::debug!(dropped, "dropping duplicate rows");
    }
    stats.duplicate_rows_dropped += dropped;
}

/// Drop rows with at least one missing cell
pub fn drop_incomplete_rows(table: &mut Table, stats: &mut CleanStats) {
    let before = table.row_count();
    table.rows.retain(|row| !row.has_null());

    let dropped = before - table.row_count();
    if dropped > 0 {
        tracing::debug!(dropped, "dropping rows with missing values");
    }
    stats.incomplete_rows_dropped += dropped;
}

/// Run the three pruning steps in order
pub fn prune(table: &mut Table, stats: &mut CleanStats) {
    drop_empty_columns(table, stats);
    drop_duplicate_rows(table, stats);
    drop_incomplete_rows(table, stats);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_drop_empty_columns() {
        let mut table = Table::from_rows(
            vec!["a", "empty", "b"],
            vec![
                vec![text("x"), CellValue::Null, CellValue::Null],
                vec![text("y"), CellValue::Null, CellValue::Int(1)],
            ],
        );
        let mut stats = CleanStats::default();
        drop_empty_columns(&mut table, &mut stats);

        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(stats.empty_columns_dropped, 1);
    }

    #[test]
    fn test_duplicates_compare_missing_as_equal() {
        let mut table = Table::from_rows(
            vec!["a", "b"],
            vec![
                vec![text("x"), CellValue::Null],
                vec![text("y"), CellValue::Int(1)],
                vec![text("x"), CellValue::Null],
                vec![text("y"), CellValue::Int(1)],
            ],
        );
        let mut stats = CleanStats::default();
        drop_duplicate_rows(&mut table, &mut stats);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].source_line, 2);
        assert_eq!(table.rows[1].source_line, 3);
        assert_eq!(stats.duplicate_rows_dropped, 2);
    }

    #[test]
    fn test_large_integers_are_not_duplicates() {
        // Both values round to the same f64
        let mut table = Table::from_rows(
            vec!["id"],
            vec![
                vec![CellValue::Int(9_007_199_254_740_992)],
                vec![CellValue::Int(9_007_199_254_740_993)],
            ],
        );
        let mut stats = CleanStats::default();
        drop_duplicate_rows(&mut table, &mut stats);

        assert_eq!(table.row_count(), 2);
        assert_eq!(stats.duplicate_rows_dropped, 0);
    }

    #[test]
    fn test_prune_order_empty_columns_before_incomplete_rows() {
        // Without dropping the empty column first, every row would be removed
        let mut table = Table::from_rows(
            vec!["a", "empty"],
            vec![
                vec![text("x"), CellValue::Null],
                vec![text("y"), CellValue::Null],
                vec![CellValue::Null, CellValue::Null],
            ],
        );
        let mut stats = CleanStats::default();
        prune(&mut table, &mut stats);

        assert_eq!(table.column_names(), vec!["a"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(stats.incomplete_rows_dropped, 1);
    }

    #[test]
    fn test_prune_can_empty_the_table() {
        let mut table = Table::from_rows(
            vec!["a", "b"],
            vec![vec![text("x"), CellValue::Null], vec![CellValue::Null, text("y")]],
        );
        let mut stats = CleanStats::default();
        prune(&mut table, &mut stats);

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_zero_rows_drops_all_columns() {
        let mut table = Table::from_rows(vec!["a", "b"], vec![]);
        let mut stats = CleanStats::default();
        prune(&mut table, &mut stats);
        assert_eq!(table.column_count(), 0);
    }
}
