//! End-to-end runs of the binary over a fixture listing.

use assert_cmd::Command;
use std::io::Write;

fn pwtree() -> Command {
    Command::cargo_bin("pwtree").unwrap()
}

#[test]
fn renders_fixture_listing() {
    let assert = pwtree()
        .args(["--json-data-path", "tests/fixtures/listing.json", "--ci"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Playwright-tree"));
    assert!(stdout.contains("auth suite"));
    assert!(stdout.contains("should login successfully"));
    assert!(stdout.contains("should skip on timeout [skipped]"));
    assert!(stdout.contains("Total: 3 tests in 1 file"));
}

#[test]
fn filter_flag_prunes_the_tree() {
    let assert = pwtree()
        .args([
            "--json-data-path",
            "tests/fixtures/listing.json",
            "--filter",
            "auth;-skip",
            "--ci",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("should login successfully"));
    assert!(!stdout.contains("should skip on timeout"));
    assert!(stdout.contains("Total: 2 tests in 1 file"));
}

#[test]
fn skipped_flag_narrows_to_annotated_specs() {
    let assert = pwtree()
        .args([
            "--json-data-path",
            "tests/fixtures/listing.json",
            "--skipped",
            "--ci",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("should login successfully"));
    assert!(stdout.contains("should skip on timeout [skipped]"));
    assert!(stdout.contains("Total: 1 test in 1 file"));
}

#[test]
fn filter_excluding_everything_reports_zero() {
    let assert = pwtree()
        .args([
            "--json-data-path",
            "tests/fixtures/listing.json",
            "--filter=-auth",
            "--ci",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Total: 0 tests in 0 files"));
}

#[test]
fn malformed_listing_aborts_with_a_message() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let assert = pwtree()
        .args(["--json-data-path", &file.path().display().to_string(), "--ci"])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("failed to parse test listing JSON"));
}
