//! CBOR transcoding: render parsed values as CBOR bytes or diagnostic text.
//!
//! Mapping:
//!   - Value::Null    -> CBOR null (simple value 22)
//!   - Value::Bool    -> CBOR bool (simple values 20/21)
//!   - Value::Number  -> CBOR float64 (always 9 bytes, never downgraded)
//!   - Value::String  -> CBOR text string (determinate length)
//!   - Value::Array   -> CBOR array (determinate length)
//!   - Value::Object  -> CBOR map (determinate length, text keys, parsed order)
//!
//! Bytes are written directly: ciborium's encoder shrinks floats to
//! float16/float32 whenever the value fits, and numbers here are always
//! float64 on the wire.

use ciborium::value::Value as CborValue;
use libscopejson::Value;
use std::fmt::{self, Write as FmtWrite};

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Encode a value as CBOR bytes.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_value(&mut buf, value);
    buf
}

fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.push(0xf6),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Number(f) => {
            // major 7, info 27
            buf.push(0xfb);
            buf.extend_from_slice(&f.to_be_bytes());
        }
        Value::String(s) => write_text(buf, s),
        Value::Array(arr) => {
            write_type_and_length(buf, 4, arr.len() as u64);
            for item in arr {
                write_value(buf, item);
            }
        }
        Value::Object(obj) => {
            write_type_and_length(buf, 5, obj.len() as u64);
            for (k, v) in obj {
                write_text(buf, k);
                write_value(buf, v);
            }
        }
    }
}

fn write_text(buf: &mut Vec<u8>, s: &str) {
    write_type_and_length(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Write a CBOR major type + length argument.
///
/// The major type sits in the high 3 bits; the low 5 bits hold the
/// argument itself (0-23) or say how many argument bytes follow
/// (24: 1, 25: 2, 26: 4, 27: 8).
fn write_type_and_length(buf: &mut Vec<u8>, major: u8, len: u64) {
    let high = major << 5;
    match len {
        0..=23 => buf.push(high | len as u8),
        24..=0xff => {
            buf.push(high | 24);
            buf.push(len as u8);
        }
        0x100..=0xffff => {
            buf.push(high | 25);
            buf.extend_from_slice(&(len as u16).to_be_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(high | 26);
            buf.extend_from_slice(&(len as u32).to_be_bytes());
        }
        _ => {
            buf.push(high | 27);
            buf.extend_from_slice(&len.to_be_bytes());
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostic Notation (RFC 8949 §8)
// ---------------------------------------------------------------------------

/// Render CBOR bytes as diagnostic notation.
///
/// Works from the encoded bytes rather than the value, so the text shows
/// exactly what went on the wire.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let mut out = String::new();
    write_diag(&mut out, &cbor_value, 0).map_err(|e| format!("CBOR diagnostic error: {}", e))?;
    out.push('\n');
    Ok(out)
}

fn write_diag(out: &mut String, val: &CborValue, indent: usize) -> fmt::Result {
    match val {
        CborValue::Null => out.write_str("null"),
        CborValue::Bool(b) => write!(out, "{}", b),
        CborValue::Integer(i) => write!(out, "{}", i128::from(*i)),
        CborValue::Float(f) => write_diag_float(out, *f),
        CborValue::Text(s) => write_diag_text(out, s),
        CborValue::Bytes(b) => {
            out.write_str("h'")?;
            for byte in b {
                write!(out, "{:02x}", byte)?;
            }
            out.write_char('\'')
        }
        CborValue::Array(arr) if arr.is_empty() => out.write_str("[]"),
        CborValue::Array(arr) => {
            if arr.len() <= 5 && arr.iter().all(is_scalar) {
                out.write_char('[')?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    write_diag(out, item, indent)?;
                }
                return out.write_char(']');
            }
            out.write_str("[\n")?;
            for (i, item) in arr.iter().enumerate() {
                write!(out, "{:width$}", "", width = indent + 2)?;
                write_diag(out, item, indent + 2)?;
                out.write_str(if i + 1 < arr.len() { ",\n" } else { "\n" })?;
            }
            write!(out, "{:width$}]", "", width = indent)
        }
        CborValue::Map(pairs) if pairs.is_empty() => out.write_str("{}"),
        CborValue::Map(pairs) => {
            out.write_str("{\n")?;
            for (i, (k, v)) in pairs.iter().enumerate() {
                write!(out, "{:width$}", "", width = indent + 2)?;
                write_diag(out, k, indent + 2)?;
                out.write_str(": ")?;
                write_diag(out, v, indent + 2)?;
                out.write_str(if i + 1 < pairs.len() { ",\n" } else { "\n" })?;
            }
            write!(out, "{:width$}}}", "", width = indent)
        }
        CborValue::Tag(tag, inner) => {
            write!(out, "{}(", tag)?;
            write_diag(out, inner, indent)?;
            out.write_char(')')
        }
        other => write!(out, "<?unknown {:?}>", other),
    }
}

fn write_diag_float(out: &mut String, f: f64) -> fmt::Result {
    if f.is_nan() {
        out.write_str("NaN")
    } else if f.is_infinite() {
        out.write_str(if f > 0.0 { "Infinity" } else { "-Infinity" })
    } else if f.fract() == 0.0 && f.abs() < 1e18 {
        write!(out, "{:.1}", f)
    } else {
        write!(out, "{}", f)
    }
}

fn write_diag_text(out: &mut String, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

fn is_scalar(val: &CborValue) -> bool {
    !matches!(val, CborValue::Array(_) | CborValue::Map(_) | CborValue::Tag(..))
}
