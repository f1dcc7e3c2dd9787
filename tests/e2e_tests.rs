//! End-to-end tests for the CLI.
//!
//! Each test:
//! 1. Copies the fixture corpus into a temp directory
//! 2. Runs a command against it
//! 3. Asserts exit code + expected JSON output

// Allow deprecated cargo_bin usage until assert_cmd updates API
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Manifest directory (project root).
fn manifest_dir() -> &'static str {
    env!("CARGO_MANIFEST_DIR")
}

/// Copy the fixture corpus into a temp directory.
fn setup_corpus() -> TempDir {
    let dir = tempfile::tempdir().expect("create tempdir");
    for name in ["reut2-000.sgm", "reut2-001.sgm"] {
        let fixture = format!("{}/fixtures/sgml/{name}", manifest_dir());
        fs::copy(&fixture, dir.path().join(name)).expect("copy fixture");
    }
    dir
}

/// Build a command running inside the tempdir.
fn newswire(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("newswire").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn load_reports_document_count() {
    let dir = setup_corpus();
    newswire(&dir)
        .args(["load", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"documents\":8"));
}

#[test]
fn load_reports_recovered_anomalies() {
    let dir = setup_corpus();
    // One document carries an unparseable date; every document ends with
    // a stripped &#3; reference.
    newswire(&dir)
        .args(["load", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date_anomalies\":[\"unknown\"]"))
        .stdout(predicate::str::contains("\"stripped_refs\":8"));
}

#[test]
fn load_empty_directory_yields_zero_documents() {
    let dir = tempfile::tempdir().unwrap();
    newswire(&dir)
        .args(["load", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"documents\":0"));
}

#[test]
fn load_missing_directory_fails_with_clear_message() {
    let dir = tempfile::tempdir().unwrap();
    newswire(&dir)
        .args(["load", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corpus directory not found"));
}

#[test]
fn load_export_writes_one_json_line_per_document() {
    let dir = setup_corpus();
    newswire(&dir)
        .args(["load", ".", "--export", "records.jsonl"])
        .assert()
        .success();

    let exported = fs::read_to_string(dir.path().join("records.jsonl")).unwrap();
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].contains("\"new_id\":\"1\""));
    assert!(lines[0].contains("\"topics\":\"earn\""));
}

#[test]
fn stats_reports_splits_and_topic_distribution() {
    let dir = setup_corpus();
    newswire(&dir)
        .args(["stats", ".", "--min-topic-count", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"train_rows\":4"))
        .stdout(predicate::str::contains("\"test_rows\":2"))
        .stdout(predicate::str::contains("\"classes\":2"))
        .stdout(predicate::str::contains("{\"topic\":\"earn\",\"count\":3}"));
}

#[test]
fn stats_with_default_threshold_rejects_tiny_corpus() {
    // Every topic here is far below the default 100-occurrence cutoff,
    // so curation leaves nothing to split.
    let dir = setup_corpus();
    newswire(&dir)
        .args(["stats", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty dataset"));
}

#[test]
fn train_produces_a_full_report() {
    let dir = setup_corpus();
    newswire(&dir)
        .args([
            "train",
            ".",
            "--min-topic-count",
            "0",
            "--epochs",
            "3",
            "--vocab-size",
            "200",
            "--validation-rows",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"train_rows\":4"))
        .stdout(predicate::str::contains("\"classes\":2"))
        .stdout(predicate::str::contains("\"test_accuracy\":"))
        .stdout(predicate::str::contains("\"epoch\":3"));
}

#[test]
fn train_respects_config_file_overridden_by_flags() {
    let dir = setup_corpus();
    fs::write(
        dir.path().join("newswire.toml"),
        "[dataset]\nmin_topic_count = 0\nvalidation_rows = 0\n\n[features]\nvocab_size = 100\n\n[model]\nepochs = 5\n",
    )
    .unwrap();
    // Flag wins over the file for epochs; the file supplies the rest.
    newswire(&dir)
        .args(["train", ".", "--epochs", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"epoch\":2"))
        .stdout(predicate::str::is_match("\"epoch\":3").unwrap().not());
}
