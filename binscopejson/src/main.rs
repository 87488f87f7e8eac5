//! scopejson command-line tool for parsing, checking, and transcoding JSON.
//!
//! Usage: scopejson [OPTIONS] [FILE|DIR]...
//!
//! Options:
//!   -t, --to <FORMAT>      Output format (debug, json, compact, python, yaml, toml, cbor, diag)
//!   -o, --output <FILE>    Write output to specified file (single input only)
//!   --check                Only validate inputs, printing `<path>: ok` for each
//!   --demo                 Run the built-in sample documents
//!   --max-depth <N>        Maximum container nesting depth
//!   --reject-duplicates    Fail on duplicate object keys
//!   -h, --help             Print help
//!   -V, --version          Print version

use libscopejson::{encode, parse_with_options, DuplicateKeys, Format, ParseOptions, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

mod demo;
mod transcode;

/// Where the rendered output for a value goes, and in what shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    /// `Value`'s Debug tree
    Debug,
    /// One of the library's text encoders
    Text(Format),
    Yaml,
    Toml,
    Cbor,
    CborDiag,
}

fn parse_output(s: &str) -> Option<Output> {
    match s {
        "debug" => Some(Output::Debug),
        "json" => Some(Output::Text(Format::Json)),
        "compact" => Some(Output::Text(Format::Compact)),
        "python" | "py" => Some(Output::Text(Format::Python)),
        "yaml" | "yml" => Some(Output::Yaml),
        "toml" => Some(Output::Toml),
        "cbor" => Some(Output::Cbor),
        "diag" => Some(Output::CborDiag),
        _ => None,
    }
}

/// A single document to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Prefix used when reporting on this input.
    fn label(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    /// Name carried in error locations.
    fn filename(&self) -> String {
        match self {
            Input::Stdin => "stdin".to_string(),
            Input::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    fn read(&self) -> io::Result<String> {
        match self {
            Input::Stdin => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            Input::File(path) => fs::read_to_string(path),
        }
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let mut output = Output::Debug;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut run_demo = false;
    let mut options = ParseOptions::default();
    let mut paths: Vec<&str> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("scopejson {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                output = match parse_output(&args[i]) {
                    Some(o) => o,
                    None => {
                        eprintln!("Error: Unknown format: {}", args[i]);
                        process::exit(1);
                    }
                };
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "--demo" => {
                run_demo = true;
            }
            "--max-depth" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --max-depth requires a number");
                    process::exit(1);
                }
                match args[i].parse::<usize>() {
                    Ok(depth) => options = options.with_max_depth(depth),
                    Err(_) => {
                        eprintln!("Error: Invalid depth: {}", args[i]);
                        process::exit(1);
                    }
                }
            }
            "--reject-duplicates" => {
                options = options.with_duplicate_keys(DuplicateKeys::Reject);
            }
            arg if arg.starts_with('-') && arg != "-" => {
                eprintln!("Error: Unknown option: {}", arg);
                eprintln!("Run 'scopejson --help' for usage.");
                process::exit(1);
            }
            arg => {
                // "-" is explicit stdin
                paths.push(arg);
            }
        }
        i += 1;
    }

    if run_demo {
        let stdout = io::stdout();
        match demo::run(&mut stdout.lock(), &options) {
            Ok(failures) => tracing::debug!(failures, "demo finished"),
            Err(e) => {
                eprintln!("Error writing to stdout: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let mut had_errors = false;
    let mut inputs: Vec<Input> = Vec::new();
    if paths.is_empty() {
        inputs.push(Input::Stdin);
    }
    for path in paths {
        if path == "-" {
            // stdin can only be read once
            if !inputs.contains(&Input::Stdin) {
                inputs.push(Input::Stdin);
            }
        } else if Path::new(path).is_dir() {
            match list_json_files(Path::new(path)) {
                Ok(files) => inputs.extend(files.into_iter().map(Input::File)),
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    had_errors = true;
                }
            }
        } else {
            inputs.push(Input::File(PathBuf::from(path)));
        }
    }

    if output_file.is_some() && inputs.len() != 1 {
        eprintln!("Error: --output requires exactly one input");
        process::exit(1);
    }

    for input in &inputs {
        if let Err(e) = process_input(input, output, output_file, check_only, &options) {
            eprintln!("{}: {}", input.label(), e);
            had_errors = true;
        }
    }

    process::exit(if had_errors { 1 } else { 0 });
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// All `*.json` files directly inside a directory, sorted by path.
fn list_json_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}

/// Parse one input and emit it; the error string is reported by the caller.
fn process_input(
    input: &Input,
    output: Output,
    output_file: Option<&str>,
    check_only: bool,
    options: &ParseOptions,
) -> Result<(), String> {
    let text = input.read().map_err(|e| format!("Error reading input: {}", e))?;
    let filename = input.filename();
    let options = options.clone().with_filename(Some(filename.as_str()));

    let value = parse_with_options(&text, &options).map_err(|e| e.to_string())?;
    tracing::debug!(input = %input.label(), kind = value.type_name(), "parsed input");

    if check_only {
        println!("{}: ok", input.label());
        return Ok(());
    }

    match render(&value, output)? {
        Rendered::Text(s) => write_text_output(&s, output_file),
        Rendered::Binary(bytes) => write_binary_output(&bytes, output_file),
    }
}

enum Rendered {
    Text(String),
    Binary(Vec<u8>),
}

fn render(value: &Value, output: Output) -> Result<Rendered, String> {
    let rendered = match output {
        Output::Debug => Rendered::Text(format!("{:?}", value)),
        Output::Text(format) => Rendered::Text(encode(value, format)),
        Output::Yaml => Rendered::Text(
            transcode::yaml::encode(value).map_err(|e| format!("Cannot convert to YAML: {}", e))?,
        ),
        Output::Toml => Rendered::Text(
            transcode::toml::encode(value).map_err(|e| format!("Cannot convert to TOML: {}", e))?,
        ),
        Output::Cbor => Rendered::Binary(transcode::cbor::encode(value)),
        Output::CborDiag => Rendered::Text(
            transcode::cbor::diagnostic(&transcode::cbor::encode(value))
                .map_err(|e| format!("Cannot render CBOR diagnostic notation: {}", e))?,
        ),
    };
    Ok(rendered)
}

fn write_text_output(output: &str, output_file: Option<&str>) -> Result<(), String> {
    let mut text = output.to_string();
    // Ensure output ends with newline
    if !text.ends_with('\n') {
        text.push('\n');
    }
    match output_file {
        Some(path) => fs::write(path, text).map_err(|e| format!("Error writing {}: {}", path, e)),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

fn write_binary_output(output: &[u8], output_file: Option<&str>) -> Result<(), String> {
    match output_file {
        Some(path) => fs::write(path, output).map_err(|e| format!("Error writing {}: {}", path, e)),
        None => {
            // Write raw bytes to stdout
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output)
                .and_then(|_| handle.flush())
                .map_err(|e| format!("Error writing to stdout: {}", e))
        }
    }
}

fn print_help() {
    println!(
        "scopejson - JSON parser built on a bracket scope table

USAGE:
    scopejson [OPTIONS] [FILE|DIR]...

ARGS:
    [FILE|DIR]...    Input files or directories (reads from stdin if none given)
                     A directory contributes every .json file directly inside it.
                     Each input is parsed on its own; a failure is reported as
                     '<path>: <error>' and the remaining inputs still run.

OPTIONS:
    -t, --to <FORMAT>      Output format [default: debug]
                           Supported: debug, json, compact, python, yaml, toml,
                                      cbor, diag

    -o, --output <FILE>    Write output to specified file (single input only)

    --check                Only validate, printing '<path>: ok' for each input

    --demo                 Run the built-in sample documents

    --max-depth <N>        Maximum container nesting depth [default: 128]

    --reject-duplicates    Fail when an object repeats a key

    -h, --help             Print help

    -V, --version          Print version

ENVIRONMENT:
    RUST_LOG               Log filter for diagnostics on stderr [default: warn]

EXAMPLES:
    # Show the parsed tree of a document
    scopejson data.json

    # Validate every .json file in a directory
    scopejson --check ./data/

    # Re-indent a document
    scopejson -t json data.json

    # Convert to YAML
    scopejson -t yaml data.json

    # Convert to CBOR (binary)
    scopejson -t cbor data.json -o data.cbor

    # View the CBOR encoding in diagnostic notation (RFC 8949 §8)
    scopejson -t diag data.json

    # Trace each pipeline stage
    RUST_LOG=trace scopejson data.json
"
    );
}
