//! JSON report format


use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::batch::{BatchSummary, FileOutcome};

use super::ReportFormatter;

/// JSON report formatter, pretty-printed
pub struct JsonReport;

#[derive(Serialize)]
struct JsonBatchReport<'a> {
    files: &'a [FileOutcome],
    summary: BatchSummary,
}

impl ReportFormatter for JsonReport {
    fn render(&self, outcomes: &[FileOutcome], writer: &mut dyn WriteColor) -> Result<()> {
        let report = JsonBatchReport {
            files: outcomes,
            summary: BatchSummary::from_outcomes(outcomes),
        };

        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        Ok(())
    }
}
