//! Column types and headers

use super::value::CellValue;

/// Type of a column's values
///
/// Sources report a type per column; inference may later replace a textual
/// type (`String` or `Mixed`) with `Date`, `DateTime`, `Int` or `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// No value seen yet
    #[default]
    Null,
    Bool,
    Int,
    Float,
    String,
    Date,
    DateTime,
    /// Values of incompatible types
    Mixed,
}

impl CellType {
    /// Smallest type holding values of both `self` and `other`.
    /// `Null` is the identity; numbers join to `Float`, dates to `DateTime`.
    pub fn join(self, other: CellType) -> CellType {
        use CellType::*;

        match (self, other) {
            (a, b) if a == b => a,
            (Null, t) | (t, Null) => t,
            (Int, Float) | (Float, Int) => Float,
            (Date, DateTime) | (DateTime, Date) => DateTime,
            _ => Mixed,
        }
    }

    /// Joined type of a sequence of cells
    pub fn of_cells<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> CellType {
        cells
            .into_iter()
            .map(CellValue::cell_type)
            .fold(CellType::Null, CellType::join)
    }

    /// Whether the column holds generic text and may be re-typed by inference
    pub fn is_textual(self) -> bool {
        matches!(self, CellType::String | CellType::Mixed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Null => "null",
            CellType::Bool => "bool",
            CellType::Int => "int",
            CellType::Float => "float",
            CellType::String => "string",
            CellType::Date => "date",
            CellType::DateTime => "datetime",
            CellType::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, positioned column and its current type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Position in the table, kept in step with removals
    pub index: usize,
    pub inferred_type: CellType,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type: CellType::Null,
        }
    }

    /// Column for a source header cell; blank headers become `Unnamed_<index>`
    pub fn from_header(header: &str, index: usize) -> Self {
        if header.trim().is_empty() {
            Self::new(format!("Unnamed_{index}"), index)
        } else {
            Self::new(header, index)
        }
    }
}
