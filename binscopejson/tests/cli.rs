//! End-to-end tests for the scopejson binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn scopejson() -> Command {
    Command::cargo_bin("scopejson").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_debug_output_from_stdin() {
    scopejson()
        .write_stdin("[1, \"two\", null]")
        .assert()
        .success()
        .stdout("[1.0, \"two\", null]\n");
}

#[test]
fn test_repeated_stdin_is_read_once() {
    scopejson()
        .args(["-", "-"])
        .write_stdin("[true]")
        .assert()
        .success()
        .stdout("[true]\n");
}

#[test]
fn test_compact_output_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "doc.json", "{ \"b\" : [ true ], \"a\" : -2.5 }");
    scopejson()
        .args(["-t", "compact"])
        .arg(&path)
        .assert()
        .success()
        .stdout("{\"b\":[true],\"a\":-2.5}\n");
}

#[test]
fn test_failure_reports_path_and_continues() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.json", "[1,2]]");
    write(&dir, "b.json", "{\"ok\": true}");
    write(&dir, "notes.txt", "not json");
    scopejson()
        .arg("--check")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "a.json: Unbalanced brackets at offset 5 of <a.json>",
        ))
        .stdout(predicate::str::contains("b.json: ok"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn test_check_all_valid_succeeds() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "ok.json", "\"Hello_World!\"");
    scopejson()
        .arg("--check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("ok.json: ok\n"));
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.json", "{\"k\": [1, 2]}");
    let output = dir.path().join("out.json");
    scopejson()
        .args(["-t", "json", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout("");
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\n  \"k\": [\n    1,\n    2\n  ]\n}\n"
    );
}

#[test]
fn test_cbor_output_is_binary() {
    scopejson()
        .args(["-t", "cbor"])
        .write_stdin("[true]")
        .assert()
        .success()
        .stdout(vec![0x81u8, 0xf5]);
}

#[test]
fn test_diag_output() {
    scopejson()
        .args(["-t", "diag"])
        .write_stdin("[1, \"x\"]")
        .assert()
        .success()
        .stdout("[1.0, \"x\"]\n");
}

#[test]
fn test_toml_rejects_non_table() {
    scopejson()
        .args(["-t", "toml"])
        .write_stdin("[1]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<stdin>: Cannot convert to TOML"));
}

#[test]
fn test_reject_duplicates_flag() {
    scopejson()
        .write_stdin("{\"a\": 1, \"a\": 2}")
        .assert()
        .success()
        .stdout("{\"a\": 2.0}\n");
    scopejson()
        .arg("--reject-duplicates")
        .write_stdin("{\"a\": 1, \"a\": 2}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate object key \"a\""));
}

#[test]
fn test_max_depth_flag() {
    scopejson()
        .args(["--max-depth", "2"])
        .write_stdin("[[[1]]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nesting deeper than 2 levels"));
}

#[test]
fn test_demo() {
    scopejson()
        .arg("--demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("---------- Running test  0 ----------"))
        .stdout(predicate::str::contains(">>>>>>>>>> Error on test  8 <<<<<<<<<"));
}

#[test]
fn test_unknown_format() {
    scopejson()
        .args(["-t", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format: xml"));
}

#[test]
fn test_output_requires_single_input() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", "1");
    let b = write(&dir, "b.json", "2");
    scopejson()
        .args(["-o", "out.json"])
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one input"));
}

#[test]
fn test_version() {
    scopejson()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("scopejson "));
}
