//! CSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::Config;
use crate::error::{CleanError, Result};
use crate::model::{CellType, CellValue, Column, Table};

use super::{source_name, Parser};

/// Field values read as missing before any cleaning, matched exactly
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, _config: &Config) -> Result<Table> {
        let name = source_name(path);
        let file = File::open(path)
            .map_err(|e| CleanError::source_format(&name, format!("failed to open file: {e}")))?;

        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };

        read_csv(BufReader::new(file), delimiter, &name)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// Read delimited text into a table, typing each column as a whole
pub fn read_csv<R: Read>(reader: R, delimiter: u8, name: &str) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    // Read headers
    let headers = csv_reader
        .headers()
        .map_err(|e| CleanError::source_format(name, format!("failed to read CSV headers: {e}")))?
        .clone();

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| Column::from_header(header, i))
        .collect();
    let width = columns.len();

    let mut raw_rows: Vec<(Vec<Option<String>>, usize)> = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| {
            CleanError::source_format(name, format!("failed to read CSV row {}: {e}", line_num + 2))
        })?; // +2 for 1-indexing and header

        let mut fields: Vec<Option<String>> = record.iter().take(width).map(raw_field).collect();
        // Pad with nulls if row has fewer columns
        fields.resize(width, None);
        raw_rows.push((fields, line_num + 2));
    }

    let column_types: Vec<CellType> = (0..width)
        .map(|idx| column_type(raw_rows.iter().filter_map(|(fields, _)| fields[idx].as_deref())))
        .collect();

    let mut table = Table::new(columns).with_name(name);
    for (col, cell_type) in table.columns.iter_mut().zip(&column_types) {
        col.inferred_type = *cell_type;
    }

    for (fields, line) in raw_rows {
        let cells = fields
            .into_iter()
            .zip(&column_types)
            .map(|(field, cell_type)| match field {
                Some(text) => typed_cell(text, *cell_type),
                None => CellValue::Null,
            })
            .collect();
        table.add_row(cells, line);
    }

    Ok(table)
}

/// Empty fields and NA tokens are missing
fn raw_field(s: &str) -> Option<String> {
    if s.is_empty() || NA_TOKENS.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Decide a column's type from all of its present fields
fn column_type<'a>(fields: impl Iterator<Item = &'a str> + Clone) -> CellType {
    let mut present = fields.clone().peekable();
    if present.peek().is_none() {
        return CellType::Null;
    }

    if fields.clone().all(|f| f.trim().parse::<i64>().is_ok()) {
        CellType::Int
    } else if fields.clone().all(|f| parse_finite(f).is_some()) {
        CellType::Float
    } else if fields.clone().all(|f| parse_bool(f).is_some()) {
        CellType::Bool
    } else {
        CellType::String
    }
}

/// Convert a raw field to a cell of the column's type. Text columns keep the
/// raw field untouched.
fn typed_cell(text: String, cell_type: CellType) -> CellValue {
    let typed = match cell_type {
        CellType::Int => text.trim().parse::<i64>().ok().map(CellValue::Int),
        CellType::Float => parse_finite(&text).map(CellValue::Float),
        CellType::Bool => parse_bool(&text).map(CellValue::Bool),
        _ => None,
    };
    typed.unwrap_or(CellValue::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str) -> Table {
        read_csv(data.as_bytes(), b',', "test.csv").unwrap()
    }

    #[test]
    fn test_column_typing() {
        let table = read("id,price,flag,label,when\n1,2.5,true,a,2024-01-01\n2,3,FALSE,b,2024-01-02\n");

        let types: Vec<_> = table.columns.iter().map(|c| c.inferred_type).collect();
        assert_eq!(
            types,
            vec![
                CellType::Int,
                CellType::Float,
                CellType::Bool,
                CellType::String,
                CellType::String
            ]
        );
        assert_eq!(table.rows[1].cells[1], CellValue::Float(3.0));
        assert_eq!(table.rows[1].cells[2], CellValue::Bool(false));
        assert_eq!(table.rows[0].cells[4], CellValue::from("2024-01-01"));
        assert_eq!(table.name, "test.csv");
    }

    #[test]
    fn test_mixed_column_keeps_raw_text() {
        let table = read("v\n42\n abc \n");
        assert_eq!(table.columns[0].inferred_type, CellType::String);
        assert_eq!(table.rows[0].cells[0], CellValue::from("42"));
        assert_eq!(table.rows[1].cells[0], CellValue::from(" abc "));
    }

    #[test]
    fn test_missing_fields() {
        let table = read("a,b,c\n1,,NA\n2\n");
        assert_eq!(table.columns[1].inferred_type, CellType::Null);
        assert_eq!(table.rows[0].cells[2], CellValue::Null);
        // Short row padded
        assert_eq!(table.rows[1].cells, vec![CellValue::Int(2), CellValue::Null, CellValue::Null]);
        assert_eq!(table.rows[1].source_line, 3);
    }

    #[test]
    fn test_na_tokens_are_missing() {
        let table = read("a,b,c,d\n<NA>,None,n/a,NULL\n#N/A N/A,-1.#IND,null,1.#QNAN\n1,x,none,Null\n");

        assert!(table.rows[0].cells.iter().all(CellValue::is_null));
        assert!(table.rows[1].cells.iter().all(CellValue::is_null));
        assert_eq!(table.columns[0].inferred_type, CellType::Int);
        // Matching is exact, so other spellings stay text
        assert_eq!(table.rows[2].cells[2], CellValue::from("none"));
        assert_eq!(table.rows[2].cells[3], CellValue::from("Null"));
    }

    #[test]
    fn test_long_rows_truncated_and_blank_headers_named() {
        let table = read("a,\n1,2,3\n");
        assert_eq!(table.column_names(), vec!["a", "Unnamed_1"]);
        assert_eq!(table.rows[0].cells.len(), 2);
    }

    #[test]
    fn test_header_whitespace_preserved() {
        let table = read("Name ,Name\nx,y\n");
        assert_eq!(table.column_names(), vec!["Name ", "Name"]);
    }

    #[test]
    fn test_tab_delimiter() {
        let table = read_csv("a\tb\n1\tx\n".as_bytes(), b'\t', "t.tsv").unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.rows[0].cells[0], CellValue::Int(1));
    }
}
