//! Encode parsed values back to text.
//!
//! Strings were never unescaped, so their raw content is written back
//! between quotes as-is. Object members keep their parsed order.

use crate::Value;

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON, indented by two spaces
    Json,
    /// JSON without any whitespace
    Compact,
    /// Python literal
    Python,
}

/// Encode a value to a string in the specified format.
pub fn encode(value: &Value, format: Format) -> String {
    match format {
        Format::Json => encode_json(value, 0),
        Format::Compact => encode_compact(value),
        Format::Python => encode_python(value, 0),
    }
}

// =============================================================================
// JSON Encoder
// =============================================================================

fn encode_json(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let pad1 = "  ".repeat(indent + 1);

    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let items: Vec<String> = arr
                .iter()
                .map(|v| format!("{}{}", pad1, encode_json(v, indent + 1)))
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), pad)
        }
        Value::Object(obj) if !obj.is_empty() => {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("{}\"{}\": {}", pad1, k, encode_json(v, indent + 1)))
                .collect();
            format!("{{\n{}\n{}}}", items.join(",\n"), pad)
        }
        _ => encode_compact(value),
    }
}

fn encode_compact(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(f) => {
            if f.is_nan() || f.is_infinite() {
                "null".to_string() // JSON doesn't support NaN/Infinity
            } else {
                format!("{}", f)
            }
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(encode_compact).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(obj) => {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", k, encode_compact(v)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

// =============================================================================
// Python Encoder
// =============================================================================

fn encode_python(value: &Value, indent: usize) -> String {
    let pad = "    ".repeat(indent);
    let pad1 = "    ".repeat(indent + 1);

    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(f) => {
            if f.is_nan() {
                "float(\"nan\")".to_string()
            } else if f.is_infinite() {
                if *f > 0.0 {
                    "float(\"inf\")".to_string()
                } else {
                    "float(\"-inf\")".to_string()
                }
            } else {
                let s = format!("{}", f);
                if s.contains('.') || s.contains('e') {
                    s
                } else {
                    format!("{}.0", s)
                }
            }
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => {
            if arr.is_empty() {
                "[]".to_string()
            } else {
                let items: Vec<String> = arr.iter().map(|v| encode_python(v, 0)).collect();
                if !items.iter().any(|i| i.contains('\n')) {
                    format!("[{}]", items.join(", "))
                } else {
                    let items: Vec<String> = arr
                        .iter()
                        .map(|v| format!("{}{},", pad1, encode_python(v, indent + 1)))
                        .collect();
                    format!("[\n{}\n{}]", items.join("\n"), pad)
                }
            }
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                "{}".to_string()
            } else {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("\"{}\": {}", k, encode_python(v, 0)))
                    .collect();
                let single_line = format!("{{{}}}", items.join(", "));
                if single_line.len() <= 80 && !items.iter().any(|i| i.contains('\n')) {
                    single_line
                } else {
                    let items: Vec<String> = obj
                        .iter()
                        .map(|(k, v)| {
                            format!("{}\"{}\": {},", pad1, k, encode_python(v, indent + 1))
                        })
                        .collect();
                    format!("{{\n{}\n{}}}", items.join("\n"), pad)
                }
            }
        }
    }
}
