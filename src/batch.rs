//! Batch processing of input files
//!
//! Each file is read, cleaned and written on its own. A failure is recorded
//! on that file's outcome and never stops the rest of the batch.

use std::collections::hash_map::Entry;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::clean::{clean_with_stats, CleanStats};
use crate::config::Config;
use crate::model::Table;
use crate::output::{artifact_path, write_csv};
use crate::parser::ParserFactory;

/// Final state of one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Cleaned with at least one row and one column left
    Cleaned,
    /// Cleaned, but nothing was left
    Empty,
    /// Reading, cleaning or writing failed
    Failed,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Cleaned => write!(f, "cleaned"),
            FileStatus::Empty => write!(f, "empty"),
            FileStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of processing one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CleanStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// First rows of the table as read
    #[serde(skip)]
    pub raw_preview: Option<Table>,
    /// First rows of the cleaned table
    #[serde(skip)]
    pub clean_preview: Option<Table>,
}

impl FileOutcome {
    fn failed(file: &Path, error: &anyhow::Error) -> Self {
        Self {
            file: file.to_path_buf(),
            status: FileStatus::Failed,
            artifact: None,
            stats: None,
            error: Some(format!("{:#}", error)),
            raw_preview: None,
            clean_preview: None,
        }
    }
}

/// A cleaned table together with what produced it
#[derive(Debug)]
pub struct CleanedFile {
    pub table: Table,
    pub stats: CleanStats,
    pub raw_preview: Option<Table>,
}

/// Read and clean one file
pub fn load_and_clean(factory: &ParserFactory, path: &Path, config: &Config) -> Result<CleanedFile> {
    let raw = factory
        .parse(path, config)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw_preview = (config.preview_rows > 0).then(|| raw.head(config.preview_rows));

    let (table, stats) =
        clean_with_stats(raw).with_context(|| format!("Failed to clean {}", path.display()))?;

    Ok(CleanedFile {
        table,
        stats,
        raw_preview,
    })
}

fn write_artifact(table: &Table, target: &Path) -> Result<()> {
    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    let file = File::create(target)
        .with_context(|| format!("Failed to create file: {}", target.display()))?;
    write_csv(table, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
}

fn try_process(factory: &ParserFactory, path: &Path, config: &Config) -> Result<FileOutcome> {
    let cleaned = load_and_clean(factory, path, config)?;

    let artifact = if config.dry_run {
        None
    } else {
        let target = artifact_path(path, config);
        write_artifact(&cleaned.table, &target)?;
        Some(target)
    };

    let status = if cleaned.stats.is_empty() {
        FileStatus::Empty
    } else {
        FileStatus::Cleaned
    };
    let clean_preview = (config.preview_rows > 0).then(|| cleaned.table.head(config.preview_rows));

    Ok(FileOutcome {
        file: path.to_path_buf(),
        status,
        artifact,
        stats: Some(cleaned.stats),
        error: None,
        raw_preview: cleaned.raw_preview,
        clean_preview,
    })
}

/// Process one file, turning any failure into a failed outcome
pub fn process_file(factory: &ParserFactory, path: &Path, config: &Config) -> FileOutcome {
    match try_process(factory, path, config) {
        Ok(outcome) => {
            match outcome.status {
                FileStatus::Empty => {
                    tracing::warn!(file = %path.display(), "cleaning left no data")
                }
                _ => tracing::info!(file = %path.display(), "cleaned"),
            }
            outcome
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %format!("{:#}", e), "file failed");
            FileOutcome::failed(path, &e)
        }
    }
}

/// For each input, the earlier input whose artifact path it shares. Inputs
/// with the same base name (`a/report.csv` and `b/report.csv` into one
/// output directory, or `report.csv` next to `report.xlsx`) would overwrite
/// each other; the first one in input order keeps the path.
fn artifact_claims<'a>(paths: &'a [PathBuf], config: &Config) -> Vec<Option<&'a Path>> {
    if config.dry_run {
        return vec![None; paths.len()];
    }

    let mut claimed: FxHashMap<PathBuf, &Path> = FxHashMap::default();
    paths
        .iter()
        .map(|path| match claimed.entry(artifact_path(path, config)) {
            Entry::Occupied(first) => Some(*first.get()),
            Entry::Vacant(slot) => {
                slot.insert(path.as_path());
                None
            }
        })
        .collect()
}

fn process_claimed(
    factory: &ParserFactory,
    path: &Path,
    taken_by: Option<&Path>,
    config: &Config,
) -> FileOutcome {
    match taken_by {
        None => process_file(factory, path, config),
        Some(first) => {
            let e = anyhow!(
                "Output {} is already written for {}",
                artifact_path(path, config).display(),
                first.display()
            );
            tracing::warn!(file = %path.display(), error = %e, "file skipped");
            FileOutcome::failed(path, &e)
        }
    }
}

/// Process every file, in parallel when `config.jobs` is not 1. Outcomes are
/// returned in input order. An input whose artifact path was already
/// claimed by an earlier input fails without being read.
pub fn process_files(paths: &[PathBuf], config: &Config) -> Result<Vec<FileOutcome>> {
    let factory = ParserFactory::new();
    let claims = artifact_claims(paths, config);

    if config.jobs == 1 || paths.len() < 2 {
        return Ok(paths
            .iter()
            .zip(&claims)
            .map(|(path, taken_by)| process_claimed(&factory, path, *taken_by, config))
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .context("Failed to start worker pool")?;

    Ok(pool.install(|| {
        paths
            .par_iter()
            .zip(claims.par_iter())
            .map(|(path, taken_by)| process_claimed(&factory, path, *taken_by, config))
            .collect()
    }))
}

/// Counts of outcomes by status
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub cleaned: usize,
    pub empty: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, o| {
            match o.status {
                FileStatus::Cleaned => acc.cleaned += 1,
                FileStatus::Empty => acc.empty += 1,
                FileStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
