//! Colored terminal report


use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::batch::{BatchSummary, FileOutcome, FileStatus};
use crate::clean::CleanStats;
use crate::model::Table;

use super::ReportFormatter;

/// Terminal report with colored status lines
pub struct TerminalReport;

impl TerminalReport {
    pub fn new() -> Self {
        Self
    }

    fn write_header(&self, writer: &mut dyn WriteColor, count: usize) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer, " tabclean: {} file(s)", count)?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_status(&self, outcome: &FileOutcome, writer: &mut dyn WriteColor) -> Result<()> {
        let color = match outcome.status {
            FileStatus::Cleaned => Color::Green,
            FileStatus::Empty => Color::Yellow,
            FileStatus::Failed => Color::Red,
        };
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(writer, "[{}]", outcome.status)?;
        writer.reset()?;
        writeln!(writer, " {}", outcome.file.display())?;

        if let Some(ref error) = outcome.error {
            writeln!(writer, "  error: {}", error)?;
        }
        if let Some(ref artifact) = outcome.artifact {
            writeln!(writer, "  wrote: {}", artifact.display())?;
        }
        if outcome.status == FileStatus::Empty {
            writeln!(writer, "  warning: no rows or columns left after cleaning")?;
        }
        Ok(())
    }

    fn write_stats(&self, stats: &CleanStats, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(
            writer,
            "  rows {} → {}, columns {} → {}",
            stats.rows_before, stats.rows_after, stats.columns_before, stats.columns_after
        )?;

        let details = [
            ("duplicate columns dropped", stats.duplicate_columns_dropped),
            ("columns renamed", stats.columns_renamed),
            ("sentinel values replaced", stats.sentinels_replaced),
            ("date columns", stats.date_columns),
            ("numeric columns", stats.numeric_columns),
            ("unparseable dates cleared", stats.date_cells_coerced_to_missing),
            ("empty columns dropped", stats.empty_columns_dropped),
            ("duplicate rows dropped", stats.duplicate_rows_dropped),
            ("rows with missing values dropped", stats.incomplete_rows_dropped),
        ];
        for (label, count) in details.iter().filter(|(_, count)| *count > 0) {
            writeln!(writer, "    {}: {}", label, count)?;
        }
        Ok(())
    }

    fn write_preview(&self, title: &str, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "  {}:", title)?;
        if table.column_count() == 0 {
            writeln!(writer, "    (no columns)")?;
            return Ok(());
        }

        let mut table_data: Vec<Vec<String>> = Vec::with_capacity(table.row_count() + 1);
        table_data.push(table.columns.iter().map(|c| c.name.clone()).collect());
        for row in &table.rows {
            table_data.push(row.cells.iter().map(|c| c.display().into_owned()).collect());
        }

        for line in build_table(&table_data).lines() {
            writeln!(writer, "    {}", line)?;
        }
        Ok(())
    }

    fn write_summary(&self, outcomes: &[FileOutcome], writer: &mut dyn WriteColor) -> Result<()> {
        let summary = BatchSummary::from_outcomes(outcomes);
        writeln!(
            writer,
            "Summary: {} cleaned, {} empty, {} failed",
            summary.cleaned, summary.empty, summary.failed
        )?;
        Ok(())
    }
}

impl Default for TerminalReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TerminalReport {
    fn render(&self, outcomes: &[FileOutcome], writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(writer, outcomes.len())?;

        for outcome in outcomes {
            self.write_status(outcome, writer)?;
            if let Some(ref stats) = outcome.stats {
                self.write_stats(stats, writer)?;
            }
            if let Some(ref raw) = outcome.raw_preview {
                self.write_preview("raw preview", raw, writer)?;
            }
            if let Some(ref cleaned) = outcome.clean_preview {
                self.write_preview("cleaned preview", cleaned, writer)?;
            }
            writeln!(writer)?;
        }

        self.write_summary(outcomes, writer)?;
        Ok(())
    }
}

/// Build a box-drawn table; the first row is the header
fn build_table(data: &[Vec<String>]) -> String {
    let Some(header) = data.first() else {
        return String::new();
    };
    if header.is_empty() {
        return String::new();
    }

    let mut col_widths: Vec<usize> = vec![0; header.len()];
    for row in data {
        for (width, cell) in col_widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: char, mid: char, right: char| {
        let mut line = String::new();
        line.push(left);
        let segments: Vec<String> = col_widths.iter().map(|w| "─".repeat(w + 2)).collect();
        line.push_str(&segments.join(&mid.to_string()));
        line.push(right);
        line.push('\n');
        line
    };
    let data_line = |row: &[String]| {
        let mut line = String::from("│");
        for (cell, width) in row.iter().zip(&col_widths) {
            line.push_str(&format!(" {:width$} │", cell, width = width));
        }
        line.push('\n');
        line
    };

    let mut output = rule('┌', '┬', '┐');
    output.push_str(&data_line(header));
    output.push_str(&rule('├', '┼', '┤'));
    for row in data.iter().skip(1) {
        output.push_str(&data_line(row));
    }
    output.push_str(&rule('└', '┴', '┘'));
    output
}
