//! Export of cleaned tables and batch reports

mod csv;
mod json;
mod terminal;

use std::io::IsTerminal;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::batch::FileOutcome;
use crate::config::ReportFormat;

pub use self::csv::{artifact_name, artifact_path, write_csv};
pub use json::JsonReport;
pub use terminal::TerminalReport;

/// Trait for batch report formatters
pub trait ReportFormatter {
    /// Render the outcomes of a batch to a writer
    fn render(&self, outcomes: &[FileOutcome], writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating report formatters
pub struct ReportFactory;

impl ReportFactory {
    /// Create a report formatter based on format type
    pub fn create(format: ReportFormat) -> Box<dyn ReportFormatter> {
        match format {
            ReportFormat::Terminal => Box::new(TerminalReport::new()),
            ReportFormat::Json => Box::new(JsonReport),
        }
    }
}

/// Render a batch report to stdout
pub fn render_to_stdout(outcomes: &[FileOutcome], format: ReportFormat) -> Result<()> {
    let color = if format == ReportFormat::Terminal && std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let formatter = ReportFactory::create(format);
    let mut stdout = StandardStream::stdout(color);
    formatter.render(outcomes, &mut stdout)
}
