//! End-to-end tests for the `generate` subcommand.

mod common;

use assert_cmd::Command;
use common::{sample_quiz_md, write_file};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("quizzy-seed").unwrap();
    cmd.env("RUST_LOG", "info");
    cmd.env_remove("SEED_USER_ID");
    cmd
}

fn read_json(path: &std::path::Path) -> Value {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn generates_json_next_to_markdown() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz.md"),
        &sample_quiz_md("Python Quiz", 2),
    );

    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success();

    let doc = read_json(&dir.path().join("python/python-quiz.json"));
    assert_eq!(doc["quizz"]["title"], "Python Quiz");
    assert_eq!(doc["quizz"]["questions"].as_array().unwrap().len(), 2);
    assert_eq!(doc["quizz"]["questions"][0]["nature"], "ChooseOne");
    assert_eq!(doc["meta"]["source"], "python/python-quiz.md");
    assert_eq!(doc["meta"]["language"], "en");
    assert_eq!(doc["meta"]["warnings"].as_array().unwrap().len(), 0);
}

#[test]
fn language_suffix_flows_into_metadata() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz-fr.md"),
        &sample_quiz_md("Quiz Python", 1),
    );

    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success();

    let doc = read_json(&dir.path().join("python/python-quiz-fr.json"));
    assert_eq!(doc["meta"]["language"], "fr");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz.md"),
        &sample_quiz_md("Python Quiz", 1),
    );

    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("would write"));

    assert!(!dir.path().join("python/python-quiz.json").exists());
}

#[test]
fn existing_output_is_skipped_without_overwrite() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz.md"),
        &sample_quiz_md("Python Quiz", 1),
    );

    bin().arg("generate").arg("--root").arg(dir.path()).assert().success();
    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipping existing file"));
    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .arg("--overwrite")
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));
}

#[test]
fn match_filter_restricts_processed_files() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz.md"),
        &sample_quiz_md("Python Quiz", 1),
    );
    write_file(
        &dir.path().join("rust/rust-quiz.md"),
        &sample_quiz_md("Rust Quiz", 1),
    );

    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .arg("--match")
        .arg("python")
        .assert()
        .success();

    assert!(dir.path().join("python/python-quiz.json").exists());
    assert!(!dir.path().join("rust/rust-quiz.json").exists());
}

#[test]
fn structural_warnings_are_reported_but_not_fatal() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz.md"),
        "## Python Quiz\n\n#### 1. Open question\nNo options follow.\n",
    );

    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("has no options"))
        .stdout(predicate::str::contains("has no marked correct answers"));

    // The record is still emitted.
    let doc = read_json(&dir.path().join("python/python-quiz.json"));
    assert_eq!(doc["quizz"]["questions"][0]["options"].as_array().unwrap().len(), 0);
    assert_eq!(doc["meta"]["warnings"].as_array().unwrap().len(), 2);
}

#[test]
fn created_by_flag_overrides_environment() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz.md"),
        &sample_quiz_md("Python Quiz", 1),
    );

    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .arg("--created-by")
        .arg("custom-user")
        .env("SEED_USER_ID", "env-user")
        .assert()
        .success();

    let doc = read_json(&dir.path().join("python/python-quiz.json"));
    assert_eq!(doc["quizz"]["createdById"], "custom-user");
}

#[test]
fn created_by_falls_back_to_environment() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join("python/python-quiz.md"),
        &sample_quiz_md("Python Quiz", 1),
    );

    bin()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .env("SEED_USER_ID", "env-user")
        .assert()
        .success();

    let doc = read_json(&dir.path().join("python/python-quiz.json"));
    assert_eq!(doc["quizz"]["createdById"], "env-user");
}
