//! Spreadsheet reader (xlsx, xlsm, xlsb, xls, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::Config;
use crate::error::{CleanError, Result};
use crate::model::{CellValue, Column, Table};

use super::{source_name, Parser};

/// Reads one sheet of a workbook; the first row is the header
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let name = source_name(path);
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| CleanError::source_format(&name, format!("failed to open workbook: {e}")))?;

        let sheet = match &config.sheet_name {
            Some(sheet) => sheet.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| CleanError::source_format(&name, "workbook has no sheets"))?,
        };
        tracing::debug!(file = %name, sheet = %sheet, "reading sheet");

        let range = workbook.worksheet_range(&sheet).map_err(|e| {
            CleanError::source_format(&name, format!("failed to read sheet {sheet}: {e}"))
        })?;

        parse_range(&range, &name)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "xlsx" | "xlsm" | "xlsb" | "xls" | "ods")
    }
}

/// Build a table from a sheet range. Short rows are padded with missing
/// cells; column types are the join of their cell types.
pub fn parse_range(range: &Range<Data>, name: &str) -> Result<Table> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| CleanError::source_format(name, "sheet is empty"))?;

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| Column::from_header(&convert_cell(cell).to_field(), i))
        .collect();
    let width = columns.len();

    let mut table = Table::new(columns).with_name(name);
    for (offset, row) in rows.enumerate() {
        let mut cells: Vec<CellValue> = row.iter().take(width).map(convert_cell).collect();
        cells.resize(width, CellValue::Null);
        // Sheet rows are 1-based and row 1 is the header
        table.add_row(cells, offset + 2);
    }

    table.refresh_column_types();
    Ok(table)
}

/// Midnight values are plain dates
fn date_or_datetime(dt: NaiveDateTime) -> CellValue {
    if dt.time() == NaiveTime::MIN {
        CellValue::Date(dt.date())
    } else {
        CellValue::DateTime(dt)
    }
}

/// Whole floats are stored as integers
fn number(f: f64) -> CellValue {
    let whole = f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64;
    if whole {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}

fn iso_datetime(text: &str) -> CellValue {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(date_or_datetime)
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d").map(CellValue::Date))
        .unwrap_or_else(|_| CellValue::from(text))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(date_or_datetime)
            .unwrap_or_else(|| CellValue::Float(dt.as_f64())),
        Data::DateTimeIso(s) => iso_datetime(s),
        Data::DurationIso(s) => CellValue::from(s.as_str()),
        Data::Error(e) => CellValue::from(format!("#{e:?}")),
    }
}
