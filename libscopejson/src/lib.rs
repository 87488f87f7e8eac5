//! JSON parser built on an up-front bracket scope table.
//!
//! Instead of tokenizing, the parser computes the extent of every array and
//! object once and reuses that map during recursive descent to decide
//! whether a stretch of text is a nested container (taken whole) or holds a
//! delimiter (split there).
//!
//! # Parsing Pipeline
//!
//! The parser operates in three phases:
//!
//! 1. **Preprocessor**: Removes whitespace outside string literals, leaving
//!    string content untouched.
//!
//! 2. **Scope Resolver**: Maps each opening bracket of the compacted text to
//!    the distance to its matching closer, rejecting unbalanced or
//!    mismatched brackets.
//!
//! 3. **Value Parser**: Recursively rebuilds the value tree, stepping over
//!    nested containers with the scope table.
//!
//! Strings are kept exactly as written between their quotes; escape
//! sequences are only used to find where a string ends.

mod encode;
mod error;
mod options;
mod parser;
mod preprocess;
mod scope;
mod value;

pub use encode::{encode, Format};
pub use error::{ParseContext, ParseError, Result};
pub use options::{DuplicateKeys, ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::parse_value;
pub use preprocess::preprocess;
pub use scope::{resolve_scopes, ScopeTable, Span};
pub use value::{Map, Value};

/// Parse a JSON document from a string.
///
/// # Example
///
/// ```
/// use libscopejson::{parse, Value};
///
/// let value = parse("[1, \"two\", null]").unwrap();
/// assert_eq!(value.as_array().map(Vec::len), Some(3));
/// assert_eq!(parse("-3").unwrap(), Value::Number(-3.0));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a JSON document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default().with_filename(filename))
}

/// Parse a JSON document with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    let ctx = ParseContext::new(options.filename.as_deref());

    // Phase 1: Strip insignificant whitespace
    let compacted = preprocess::preprocess(input);

    // Phase 2: Resolve bracket scopes
    let scopes = scope::resolve_scopes_in(&compacted, &ctx)?;

    // Phase 3: Parse spans into a value
    let value = parser::parse_root(&compacted, &scopes, options, &ctx)?;
    tracing::debug!(
        compacted_len = compacted.len(),
        scopes = scopes.len(),
        kind = value.type_name(),
        "parsed document"
    );
    Ok(value)
}
