//! Integration tests for the tabclean binary
//!
//! Each test writes fixture files into a scratch directory and runs the
//! compiled binary against them.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const MESSY_CSV: &str = "\
Name ,Name,Date,Amt
  Alice ,a2,2024-01-05,10
Bob,b2,2024-01-06,20.5
NULL,c2,2024-01-07,30
Dana,d2,2024-02-30,40
Bob,b2,2024-01-06,20.5
Eve,e2,2024-01-09,50
";

const MESSY_CLEANED: &str = "\
Name,Date,Amt
Alice,2024-01-05,10.0
Bob,2024-01-06,20.5
Eve,2024-01-09,50.0
";

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn tabclean() -> Command {
    let mut cmd = Command::cargo_bin("tabclean").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cleans_file_next_to_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "messy.csv", MESSY_CSV);

    tabclean()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("[cleaned]"))
        .stdout(predicate::str::contains("clean_messy.csv"))
        .stdout(predicate::str::contains("Summary: 1 cleaned, 0 empty, 0 failed"));

    let written = fs::read_to_string(dir.path().join("clean_messy.csv")).unwrap();
    assert_eq!(written, MESSY_CLEANED);
}

#[test]
fn test_output_dir_and_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "data.v2.csv", "a,b\n1,x\n");
    let out = dir.path().join("out");

    tabclean()
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .args(["--prefix", "tidy_"])
        .assert()
        .success();

    let written = fs::read_to_string(out.join("tidy_data.v2.csv")).unwrap();
    assert_eq!(written, "a,b\n1,x\n");
}

#[test]
fn test_failed_file_does_not_stop_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_fixture(dir.path(), "good.csv", "a\n1\n2\n");
    let missing = dir.path().join("missing.csv");

    tabclean()
        .arg(&missing)
        .arg(&good)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[failed]"))
        .stdout(predicate::str::contains("missing.csv"))
        .stdout(predicate::str::contains("[cleaned]"))
        .stdout(predicate::str::contains("Summary: 1 cleaned, 0 empty, 1 failed"));

    assert!(dir.path().join("clean_good.csv").exists());
}

#[test]
fn test_inputs_sharing_a_base_name_keep_first_artifact() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    let first = write_fixture(&dir.path().join("a"), "report.csv", "x\nfrom_a\n");
    let second = write_fixture(&dir.path().join("b"), "report.csv", "x\nfrom_b\n");
    let out = dir.path().join("out");

    tabclean()
        .arg(&first)
        .arg(&second)
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("already written"))
        .stdout(predicate::str::contains("Summary: 1 cleaned, 0 empty, 1 failed"));

    let written = fs::read_to_string(out.join("clean_report.csv")).unwrap();
    assert_eq!(written, "x\nfrom_a\n");
}

#[test]
fn test_unsupported_extension_fails_that_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "notes.pdf", "%PDF-1.4");

    tabclean()
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unsupported file type: pdf"));
}

#[test]
fn test_empty_result_is_success_with_header_only_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "sparse.csv", "a,b\nunknown,1\n2,null\n");

    tabclean()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("[empty]"));

    let written = fs::read_to_string(dir.path().join("clean_sparse.csv")).unwrap();
    assert_eq!(written, "a,b\n");
}

#[test]
fn test_json_report_with_dry_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "messy.csv", MESSY_CSV);

    let output = tabclean()
        .arg(&input)
        .args(["--format", "json", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let file = &report["files"][0];
    assert_eq!(file["status"], "cleaned");
    assert!(file.get("artifact").is_none());
    assert_eq!(file["stats"]["rows_before"], 6);
    assert_eq!(file["stats"]["rows_after"], 3);
    assert_eq!(file["stats"]["duplicate_columns_dropped"], 1);
    assert_eq!(report["summary"]["cleaned"], 1);

    assert!(!dir.path().join("clean_messy.csv").exists());
}

#[test]
fn test_preview_shows_raw_and_cleaned_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "messy.csv", MESSY_CSV);

    tabclean()
        .arg(&input)
        .args(["--preview", "2", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("raw preview"))
        .stdout(predicate::str::contains("cleaned preview"))
        .stdout(predicate::str::contains("│ Alice"));
}

#[test]
fn test_stdout_mode_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "messy.csv", MESSY_CSV);

    tabclean()
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .stdout(MESSY_CLEANED);

    assert!(!dir.path().join("clean_messy.csv").exists());
}

#[test]
fn test_stdout_mode_requires_single_input() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.csv", "x\n1\n");
    let b = write_fixture(dir.path(), "b.csv", "x\n2\n");

    tabclean()
        .arg(&a)
        .arg(&b)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exactly one input"));
}

#[test]
fn test_parallel_jobs_keep_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..4)
        .map(|i| write_fixture(dir.path(), &format!("f{i}.csv"), "n\n1\n"))
        .collect();

    let output = tabclean()
        .args(&paths)
        .args(["--jobs", "4", "--format", "json", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files: Vec<PathBuf> = report["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| PathBuf::from(f["file"].as_str().unwrap()))
        .collect();
    assert_eq!(files, paths);
}

#[test]
fn test_no_inputs_is_usage_error() {
    tabclean().assert().code(2);
}
