//! Configuration handling for tabclean

use std::path::PathBuf;

/// Default prefix for cleaned artifact names
pub const DEFAULT_PREFIX: &str = "clean_";

/// Format of the batch report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(ReportFormat::Terminal),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Configuration for a cleaning run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for cleaned files; `None` writes next to each source
    pub output_dir: Option<PathBuf>,
    /// Prefix for cleaned file names
    pub prefix: String,
    /// For Excel files: which sheet to read
    pub sheet_name: Option<String>,
    /// Report format
    pub report_format: ReportFormat,
    /// Rows shown in raw/cleaned previews (0 disables previews)
    pub preview_rows: usize,
    /// Worker threads for a batch; 0 lets rayon decide
    pub jobs: usize,
    /// Write the cleaned CSV to stdout instead of a file
    pub to_stdout: bool,
    /// Clean and report without writing any file
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
            sheet_name: None,
            report_format: ReportFormat::default(),
            preview_rows: 0,
            jobs: 1,
            to_stdout: false,
            dry_run: false,
        }
    }
}

impl Config {
    /// Create a new Config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Set the artifact name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set Excel sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = Some(name);
        self
    }

    /// Set report format
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    /// Set how many rows previews show
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Set the number of worker threads
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enable stdout mode
    pub fn with_stdout(mut self, to_stdout: bool) -> Self {
        self.to_stdout = to_stdout;
        self
    }

    /// Enable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
