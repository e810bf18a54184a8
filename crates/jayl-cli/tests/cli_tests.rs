//! Integration tests for the `jayl` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the fmt and
//! verify subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, and error diagnostics.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

// ─────────────────────────────────────────────────────────────────────────────
// Fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_stdin_to_stdout_with_default_indent() {
    Command::cargo_bin("jayl")
        .unwrap()
        .arg("fmt")
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .success()
        .stdout("{\n    \"a\": 1\n}\n");
}

#[test]
fn fmt_compact_minifies() {
    let input = "{\n  \"name\": \"Ada\",\n  \"scores\": [ 95, 87 ]\n}\n";

    Command::cargo_bin("jayl")
        .unwrap()
        .args(["fmt", "--compact"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(r#"{"name":"Ada","scores":[95,87]}"#);
}

#[test]
fn fmt_honors_the_indent_width() {
    Command::cargo_bin("jayl")
        .unwrap()
        .args(["fmt", "--indent", "2"])
        .write_stdin(r#"{"a":[1,2]}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": [\n    1,\n    2\n  ]\n}\n");
}

#[test]
fn fmt_file_to_file() {
    let output_path = "/tmp/jayl-test-fmt-output.json";

    // Clean up from any prior run
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("jayl")
        .unwrap()
        .args(["fmt", "--compact", "-i", sample_json_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(
        content.contains(r#""name":"Ada Lovelace""#),
        "compact output should contain the name field, got {content:?}"
    );
    assert!(!content.contains('\n'), "compact output has no newlines");

    // Clean up
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn fmt_output_is_itself_valid() {
    let pretty = Command::cargo_bin("jayl")
        .unwrap()
        .args(["fmt", "-i", sample_json_path()])
        .output()
        .expect("fmt should run");
    assert!(pretty.status.success(), "fmt must succeed");

    Command::cargo_bin("jayl")
        .unwrap()
        .args(["verify", "-q"])
        .write_stdin(pretty.stdout)
        .assert()
        .success();
}

#[test]
fn fmt_is_a_fixed_point_on_compact_text() {
    let once = Command::cargo_bin("jayl")
        .unwrap()
        .args(["fmt", "--compact", "-i", sample_json_path()])
        .output()
        .expect("fmt should run");
    assert!(once.status.success());

    let twice = Command::cargo_bin("jayl")
        .unwrap()
        .args(["fmt", "--compact"])
        .write_stdin(once.stdout.clone())
        .output()
        .expect("fmt should run");
    assert!(twice.status.success());

    assert_eq!(once.stdout, twice.stdout, "minifying twice changes nothing");
}

#[test]
fn fmt_invalid_json_fails() {
    Command::cargo_bin("jayl")
        .unwrap()
        .arg("fmt")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON input"));
}

#[test]
fn fmt_conflicting_flags_fail() {
    Command::cargo_bin("jayl")
        .unwrap()
        .args(["fmt", "--compact", "--indent", "2"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Verify subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verify_valid_input_reports_ok() {
    Command::cargo_bin("jayl")
        .unwrap()
        .args(["verify", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn verify_quiet_prints_nothing() {
    Command::cargo_bin("jayl")
        .unwrap()
        .args(["verify", "-q"])
        .write_stdin("[1,2,3]")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn verify_diagnostics_name_the_byte_offset() {
    Command::cargo_bin("jayl")
        .unwrap()
        .arg("verify")
        .write_stdin("[1, 2,,]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at byte 6"));
}

#[test]
fn verify_rejects_trailing_data() {
    Command::cargo_bin("jayl")
        .unwrap()
        .arg("verify")
        .write_stdin("{} extra")
        .assert()
        .failure()
        .stderr(predicate::str::contains("trailing"));
}

#[test]
fn verify_rejects_truncated_input() {
    Command::cargo_bin("jayl")
        .unwrap()
        .arg("verify")
        .write_stdin("[1,2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected end"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Edge cases
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("jayl")
        .unwrap()
        .args(["verify", "-i", "/nonexistent/jayl-no-such-file.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("jayl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("jayl")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
