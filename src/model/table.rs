//! In-memory table: ordered columns and aligned rows

use super::schema::{CellType, Column};
use super::value::CellValue;

/// One record, with the source line it came from for error messages
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
    /// 1-based line in the source; the header is line 1
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Whether any cell in the row is missing
    pub fn has_null(&self) -> bool {
        self.cells.iter().any(CellValue::is_null)
    }
}

/// A named table. Every row is expected to hold one cell per column; the
/// cleaning pipeline checks this before it runs.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Identity used in logs and errors, usually the source file name
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Build a table from header names and rows of cells. Rows are numbered
    /// from line 2 and column types are derived from the cells.
    pub fn from_rows<S: Into<String>>(names: Vec<S>, rows: Vec<Vec<CellValue>>) -> Self {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name, i))
            .collect();
        let mut table = Table::new(columns);
        table.rows = rows
            .into_iter()
            .zip(2..)
            .map(|(cells, line)| Row::new(cells, line))
            .collect();
        table.refresh_column_types();
        table
    }

    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cells of the column at `index`, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.cells.get(index))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Keep the columns whose flag in `keep` is set, dropping the matching
    /// cells from every row. Missing flags count as unset.
    pub fn retain_columns(&mut self, keep: &[bool]) {
        fn retain<T>(items: &mut Vec<T>, keep: &[bool]) {
            let mut flags = keep.iter();
            items.retain(|_| flags.next().copied().unwrap_or(false));
        }

        retain(&mut self.columns, keep);
        for row in &mut self.rows {
            retain(&mut row.cells, keep);
        }
        for (i, col) in self.columns.iter_mut().enumerate() {
            col.index = i;
        }
    }

    /// Recompute every column's type as the join of its cell types
    pub fn refresh_column_types(&mut self) {
        let types: Vec<CellType> = (0..self.columns.len())
            .map(|idx| CellType::of_cells(self.column_values(idx)))
            .collect();
        for (col, cell_type) in self.columns.iter_mut().zip(types) {
            col.inferred_type = cell_type;
        }
    }

    /// Copy of the first `n` rows
    pub fn head(&self, n: usize) -> Table {
        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
