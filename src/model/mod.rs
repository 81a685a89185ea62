//! Tables, columns and cell values

mod schema;
mod table;
mod value;

pub use schema::{CellType, Column};
pub use table::{Row, Table};
pub use value::CellValue;
