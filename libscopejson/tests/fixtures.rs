//! Test harness for the parser against fixture files.
//!
//! Every `test/ok/*.json` file must parse, and its compact re-encoding must
//! match the `.expect` file next to it. Every `test/nok/*.json` file must
//! fail, with the message from the matching `.error` file when one exists.

use std::fs;
use std::path::{Path, PathBuf};

use libscopejson::{encode, parse, parse_with_filename, Format, Value};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All `.json` files in a subdirectory of test/, sorted.
fn get_json_files(subdir: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join("*.json");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

/// Read the sibling file with another extension, if present.
fn read_sibling(path: &Path, ext: &str) -> Option<String> {
    fs::read_to_string(path.with_extension(ext)).ok()
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

/// Run a single ok/ fixture (expected to succeed).
fn run_ok_test(path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let filename = file_name(path);

    match parse(&content) {
        Ok(value) => {
            let actual = encode(&value, Format::Compact);
            if let Some(expected) = read_sibling(path, "expect") {
                let expected = expected.trim();
                if actual != expected {
                    return Err(format!(
                        "{}: Output mismatch\n    expected: {}\n    actual:   {}",
                        filename, expected, actual
                    ));
                }
                println!("  {} => {}", filename, actual);
            } else {
                println!("  {} => {:?} (no expected output)", filename, value);
            }
            Ok(())
        }
        Err(e) => Err(format!("{}: Unexpected parse error: {}", filename, e)),
    }
}

/// Run a single nok/ fixture (expected to fail with a specific error).
fn run_nok_test(path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let filename = file_name(path);

    match parse_with_filename(&content, Some(&filename)) {
        Ok(value) => Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            filename, value
        )),
        Err(e) => {
            let actual_error = e.to_string();
            match read_expected_error(path) {
                Some(expected) if actual_error == expected => {
                    println!("  {} => error (as expected)", filename);
                    Ok(())
                }
                Some(expected) => Err(format!(
                    "{}: Error mismatch\n    expected: {}\n    actual:   {}",
                    filename, expected, actual_error
                )),
                None => {
                    println!(
                        "  {} => error: {} (no .error file to compare)",
                        filename, actual_error
                    );
                    Ok(())
                }
            }
        }
    }
}

fn read_expected_error(path: &Path) -> Option<String> {
    read_sibling(path, "error").map(|s| s.trim().to_string())
}

fn run_all(subdir: &str, run: fn(&Path) -> Result<(), String>) {
    let files = get_json_files(subdir);
    assert!(!files.is_empty(), "no fixtures found in test/{}", subdir);

    println!("\nRunning {} test/{} fixtures:", files.len(), subdir);

    let errors: Vec<String> = files.iter().filter_map(|f| run(f).err()).collect();

    println!(
        "\nResults: {} passed, {} failed",
        files.len() - errors.len(),
        errors.len()
    );
    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }

    assert!(errors.is_empty(), "{} test/{} fixtures failed", errors.len(), subdir);
}

#[test]
fn test_all_ok_fixtures() {
    run_all("ok", run_ok_test);
}

#[test]
fn test_all_nok_fixtures() {
    run_all("nok", run_nok_test);
}

/// Every ok fixture re-parses from each of its own JSON encodings to the
/// same tree.
#[test]
fn test_reencoding_is_stable() {
    for file in get_json_files("ok") {
        let content = fs::read_to_string(&file).unwrap();
        let value = parse(&content).unwrap();
        for format in [Format::Compact, Format::Json] {
            let reparsed = parse(&encode(&value, format)).unwrap();
            assert_eq!(reparsed, value, "{} via {:?}", file.display(), format);
        }
    }
}

#[test]
fn test_glossary_structure() {
    let content = fs::read_to_string(test_root().join("ok").join("glossary.json")).unwrap();
    let value = parse(&content).unwrap();
    let entry = value
        .get("glossary")
        .and_then(|g| g.get("GlossDiv"))
        .and_then(|d| d.get("GlossList"))
        .and_then(|l| l.get("GlossEntry"))
        .expect("nested GlossEntry");
    assert_eq!(entry.get("Abbrev").and_then(Value::as_str), Some("ISO 8879:1986"));
    assert_eq!(
        entry.get("GlossDef").and_then(|d| d.get("GlossSeeAlso")),
        Some(&Value::Array(vec![Value::from("GML"), Value::from("XML")]))
    );
}
