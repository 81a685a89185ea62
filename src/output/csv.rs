//! CSV export of cleaned tables

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::model::Table;

/// Write `table` as CSV: header row of column names, then one record per
/// row. Missing values are written as empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if table.column_count() > 0 {
        csv_writer.write_record(table.columns.iter().map(|c| c.name.as_str()))?;
        for row in &table.rows {
            csv_writer.write_record(row.cells.iter().map(|c| c.to_field().into_owned()))?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Name of the cleaned artifact: prefix + base name + `.csv`, where the
/// base name is the file name without its last extension.
pub fn artifact_name(source: &Path, prefix: &str) -> String {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = file_name
        .rsplit_once('.')
        .map(|(base, _)| base)
        .unwrap_or(file_name.as_str());
    format!("{}{}.csv", prefix, base)
}

/// Where the cleaned artifact for `source` is written
pub fn artifact_path(source: &Path, config: &Config) -> PathBuf {
    let dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(artifact_name(source, &config.prefix))
}
