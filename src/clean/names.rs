//! Column-name normalization

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::model::Table;

use super::CleanStats;

/// Runs of characters that are not allowed in a column name
static DISALLOWED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid column-name pattern"));

/// Replace each run of disallowed characters with a single underscore
pub fn sanitize_name(name: &str) -> String {
    DISALLOWED_RUN.replace_all(name, "_").into_owned()
}

/// Strip names, drop later columns with a repeated stripped name, then
/// sanitize what is left. A name with nothing left after stripping becomes
/// `Unnamed_<index>`.
pub fn normalize_column_names(table: &mut Table, stats: &mut CleanStats) {
    let mut seen: IndexSet<String> = IndexSet::new();
    let keep: Vec<bool> = table
        .columns
        .iter()
        .map(|col| seen.insert(col.name.trim().to_string()))
        .collect();

    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        tracing::debug!(dropped, "dropping duplicate columns");
        table.retain_columns(&keep);
    }
    stats.duplicate_columns_dropped += dropped;

    let mut used: IndexSet<String> = IndexSet::new();
    for col in &mut table.columns {
        let mut base = sanitize_name(col.name.trim());
        if base.is_empty() {
            base = format!("Unnamed_{}", col.index);
        }
        let mut name = base.clone();
        let mut suffix = 2;
        while used.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        used.insert(name.clone());

        if name != col.name {
            tracing::debug!(from = %col.name, to = %name, "renaming column");
            stats.columns_renamed += 1;
            col.name = name;
        }
    }
}
