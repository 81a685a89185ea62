//! tabclean - Automated cleaning of tabular data

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};

use tabclean::batch::{load_and_clean, process_files, BatchSummary};
use tabclean::config::{Config, ReportFormat, DEFAULT_PREFIX};
use tabclean::output::{render_to_stdout, write_csv};
use tabclean::parser::ParserFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    Terminal,
    Json,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(f: CliReportFormat) -> Self {
        match f {
            CliReportFormat::Terminal => ReportFormat::Terminal,
            CliReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// Clean tabular data files (CSV, TSV, Excel, ODS) into tidy CSV
#[derive(Parser, Debug)]
#[command(name = "tabclean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to clean
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for cleaned files (default: next to each source)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Prefix for cleaned file names
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// For Excel files: which sheet to read
    #[arg(long)]
    sheet: Option<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliReportFormat,

    /// Show the first N rows before and after cleaning
    #[arg(long, default_value_t = 0)]
    preview: usize,

    /// Worker threads (0 uses all cores)
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Write the cleaned CSV to stdout (single input only)
    #[arg(long)]
    stdout: bool,

    /// Clean and report without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(failed) => {
            if failed {
                ExitCode::from(1) // At least one file failed
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    tabclean::logging::init(cli.verbose);

    let mut config = Config::new()
        .with_prefix(cli.prefix)
        .with_report_format(cli.format.into())
        .with_preview_rows(cli.preview)
        .with_jobs(cli.jobs)
        .with_stdout(cli.stdout)
        .with_dry_run(cli.dry_run);
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(sheet) = cli.sheet {
        config = config.with_sheet_name(sheet);
    }

    if config.to_stdout {
        if cli.files.len() != 1 {
            bail!("--stdout takes exactly one input file, got {}", cli.files.len());
        }
        return clean_to_stdout(&cli.files[0], &config);
    }

    let outcomes = process_files(&cli.files, &config)?;
    render_to_stdout(&outcomes, config.report_format).context("Failed to write report")?;

    Ok(BatchSummary::from_outcomes(&outcomes).has_failures())
}

/// Clean one file and stream the CSV to stdout. A failure of the file
/// itself is reported on stderr and counts as a failed batch.
fn clean_to_stdout(path: &Path, config: &Config) -> Result<bool> {
    let factory = ParserFactory::new();
    let cleaned = match load_and_clean(&factory, path, config) {
        Ok(cleaned) => cleaned,
        Err(e) => {
            eprintln!("{}: {:#}", path.display(), e);
            return Ok(true);
        }
    };
    if cleaned.stats.is_empty() {
        tracing::warn!(file = %path.display(), "cleaning left no data");
    }

    let stdout = io::stdout();
    write_csv(&cleaned.table, BufWriter::new(stdout.lock()))
        .context("Failed to write CSV to stdout")?;
    Ok(false)
}
