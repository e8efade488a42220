use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_hmdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> serde_json::Value {
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&output).unwrap()
}

// -- dump mode --

#[test]
fn json_dump_has_two_records_in_source_order() {
    let example = fixture_path("example.js");
    let assert = cmd().arg(&example).assert().success();
    let json = stdout_json(&assert);

    let records = json[example.as_str()].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "loadURL");
    assert_eq!(records[0]["signature"], "request -> url -> Promise");
    assert!(records[0]["description"]
        .as_str()
        .unwrap()
        .contains("#### Description"));
    assert_eq!(records[1]["name"], "readFile");
    assert!(records[1].get("description").is_none());
    assert_eq!(records[1]["parsed"]["type"]["children"].as_array().unwrap().len(), 4);
}

#[test]
fn files_flag_accepts_globs() {
    let pattern = format!("{}/tests/fixtures/ex*.js", env!("CARGO_MANIFEST_DIR"));
    let assert = cmd().args(["-f", &pattern]).assert().success();
    let json = stdout_json(&assert);
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[test]
fn prose_only_file_is_absent() {
    let assert = cmd()
        .arg(fixture_path("example.js"))
        .arg(fixture_path("prose.js"))
        .assert()
        .success();
    let json = stdout_json(&assert);
    let files = json.as_object().unwrap();
    assert_eq!(files.len(), 1);
    assert!(!files.contains_key(&fixture_path("prose.js")));
}

#[test]
fn markdown_format() {
    cmd()
        .args(["--format", "markdown"])
        .arg(fixture_path("example.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "## .readFile\n`fs -> filename -> encoding -> Promise`\n",
        ))
        .stdout(predicate::str::contains("## .loadURL\n`request -> url -> Promise`\n\n"))
        .stdout(predicate::str::contains("random comment").not());
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["--format", "yaml"])
        .arg(fixture_path("example.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- failure isolation --

#[test]
fn malformed_file_is_skipped_with_warning() {
    let assert = cmd()
        .arg(fixture_path("example.js"))
        .arg(fixture_path("broken.js"))
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"));
    let json = stdout_json(&assert);
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[test]
fn strict_mode_fails_on_malformed_file() {
    cmd()
        .arg("--strict")
        .arg(fixture_path("example.js"))
        .arg(fixture_path("broken.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 file(s) failed to parse"));
}

// -- template mode --

#[test]
fn template_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("README.md");

    cmd()
        .arg(fixture_path("example.js"))
        .args(["-t", &fixture_path("template.md")])
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(format!("Successfully wrote filename: {}\n", out.display()));

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("# Example API\n\n## "));
    assert!(written.contains("## .loadURL\n`request -> url -> Promise`\n\n\n#### Description"));
    assert!(written.ends_with("## .readFile\n`fs -> filename -> encoding -> Promise`\n\n"));
}

#[test]
fn legacy_template_matches_modern_template() {
    let modern = cmd()
        .arg(fixture_path("example.js"))
        .args(["-t", &fixture_path("template.md")])
        .assert()
        .success();
    let legacy = cmd()
        .arg(fixture_path("example.js"))
        .args(["-t", &fixture_path("legacy.hbs")])
        .assert()
        .success();
    assert_eq!(modern.get_output().stdout, legacy.get_output().stdout);
}

#[test]
fn missing_template_fails() {
    cmd()
        .arg(fixture_path("example.js"))
        .args(["-t", &fixture_path("does-not-exist.md")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to render template"))
        .stderr(predicate::str::contains("does-not-exist.md"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
