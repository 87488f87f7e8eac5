//! Phase 3: Value Parser
//!
//! Rebuilds the value tree by recursive descent over spans of the compacted
//! text. Nothing is tokenized: inside a container the parser walks the
//! interior byte by byte and is always in one of two states:
//!
//! - **skipping**: the position opens a nested container (it has an entry in
//!   the scope table), so the whole container is stepped over in one move;
//! - **accumulating**: anything else; a top-level comma outside a string
//!   closes the current element span, and the closing bracket closes the
//!   last one.
//!
//! Every span is kept in coordinates of the text being parsed; `base` maps
//! them back to the positions the scope table was built on.

use crate::error::{ParseContext, ParseError, Result};
use crate::options::{DuplicateKeys, ParseOptions};
use crate::preprocess::QuoteTracker;
use crate::scope::{ScopeTable, Span};
use crate::value::{Map, Value};

/// Parse `text` as a single value.
///
/// `start_offset` is the position of `text[0]` in the compacted text that
/// `scopes` was resolved from; pass 0 when `text` is that whole text.
pub fn parse_value(text: &str, scopes: &ScopeTable, start_offset: usize) -> Result<Value> {
    let options = ParseOptions::default();
    let ctx = ParseContext::default();
    Parser::new(text, start_offset, scopes, &options, &ctx).parse_root()
}

/// Parse a whole compacted document.
pub(crate) fn parse_root(
    text: &str,
    scopes: &ScopeTable,
    options: &ParseOptions,
    ctx: &ParseContext,
) -> Result<Value> {
    Parser::new(text, 0, scopes, options, ctx).parse_root()
}

struct Parser<'a> {
    text: &'a str,
    base: usize,
    scopes: &'a ScopeTable,
    options: &'a ParseOptions,
    ctx: &'a ParseContext,
}

impl<'a> Parser<'a> {
    fn new(
        text: &'a str,
        base: usize,
        scopes: &'a ScopeTable,
        options: &'a ParseOptions,
        ctx: &'a ParseContext,
    ) -> Self {
        Self {
            text,
            base,
            scopes,
            options,
            ctx,
        }
    }

    fn parse_root(&self) -> Result<Value> {
        self.parse_span(Span::new(0, self.text.len()), 0)
    }

    fn error(&self, err: ParseError, pos: usize) -> ParseError {
        err.with_location(self.ctx, self.base + pos)
    }

    fn skip_at(&self, pos: usize) -> Option<usize> {
        self.scopes.skip_at(self.base + pos)
    }

    /// Parse one value span. `depth` counts the containers around it.
    fn parse_span(&self, span: Span, depth: usize) -> Result<Value> {
        let raw = span.slice(self.text);
        match raw.as_bytes().first() {
            None => Err(self.error(ParseError::EmptyInput(String::new()), span.begin)),
            Some(b'[') | Some(b'{') => {
                let depth = depth + 1;
                if depth > self.options.max_depth {
                    return Err(self.error(
                        ParseError::NestingTooDeep(self.options.max_depth, String::new()),
                        span.begin,
                    ));
                }
                self.check_extent(span)?;
                match raw {
                    "[]" => Ok(Value::Array(Vec::new())),
                    "{}" => Ok(Value::Object(Map::new())),
                    _ if raw.starts_with('[') => self.parse_array(span, depth),
                    _ => self.parse_object(span, depth),
                }
            }
            Some(_) => self.parse_primitive(span),
        }
    }

    /// A container span must end exactly at its own closing bracket.
    fn check_extent(&self, span: Span) -> Result<()> {
        match self.skip_at(span.begin) {
            // A bracket pair covers at least two bytes
            None | Some(0) => {
                Err(self.error(ParseError::UnbalancedBrackets(String::new()), span.begin))
            }
            Some(skip) if skip + 1 == span.len() => Ok(()),
            Some(skip) if skip + 1 < span.len() => Err(self.error(
                ParseError::TrailingContent(String::new()),
                span.begin + skip + 1,
            )),
            Some(_) => Err(self.error(ParseError::UnbalancedBrackets(String::new()), span.begin)),
        }
    }

    fn parse_array(&self, span: Span, depth: usize) -> Result<Value> {
        tracing::trace!(offset = self.base + span.begin, len = span.len(), "array");
        let close = span.end - 1;
        let mut items = Vec::new();
        let mut element = span.begin + 1;
        loop {
            match self.find_top_level(element, close, b',')? {
                Some(comma) => {
                    items.push(self.parse_span(Span::new(element, comma), depth)?);
                    element = comma + 1;
                }
                None => {
                    items.push(self.parse_span(Span::new(element, close), depth)?);
                    break;
                }
            }
        }
        Ok(Value::Array(items))
    }

    fn parse_object(&self, span: Span, depth: usize) -> Result<Value> {
        tracing::trace!(offset = self.base + span.begin, len = span.len(), "object");
        let close = span.end - 1;
        let mut map = Map::new();
        let mut member = span.begin + 1;
        loop {
            let Some(colon) = self.find_top_level(member, close, b':')? else {
                return Err(self.error(ParseError::InvalidObjectStructure(String::new()), member));
            };
            let key = self.parse_key(Span::new(member, colon))?;

            let value_start = colon + 1;
            let comma = self.find_top_level(value_start, close, b',')?;
            let value = self.parse_span(Span::new(value_start, comma.unwrap_or(close)), depth)?;
            self.insert(&mut map, key, value, member)?;

            match comma {
                Some(comma) => member = comma + 1,
                None => break,
            }
        }
        Ok(Value::Object(map))
    }

    /// Find the next `target` byte in `[from, close)` that sits neither in a
    /// string literal nor in a nested container.
    fn find_top_level(&self, from: usize, close: usize, target: u8) -> Result<Option<usize>> {
        let bytes = self.text.as_bytes();
        let mut quotes = QuoteTracker::default();
        let mut pos = from;
        while pos < close {
            if !quotes.in_string() {
                if let Some(skip) = self.skip_at(pos) {
                    if pos + skip >= close {
                        return Err(
                            self.error(ParseError::UnbalancedBrackets(String::new()), pos)
                        );
                    }
                    pos += skip + 1;
                    continue;
                }
            }
            let b = bytes[pos];
            if !quotes.step_byte(b) && b == target {
                return Ok(Some(pos));
            }
            pos += 1;
        }
        Ok(None)
    }

    fn parse_key(&self, span: Span) -> Result<String> {
        let raw = span.slice(self.text);
        match string_literal_body(raw) {
            Some(key) => Ok(key.to_string()),
            None => Err(self.error(
                ParseError::InvalidObjectKey(raw.to_string(), String::new()),
                span.begin,
            )),
        }
    }

    fn insert(&self, map: &mut Map, key: String, value: Value, pos: usize) -> Result<()> {
        if self.options.duplicate_keys == DuplicateKeys::Reject && map.contains_key(&key) {
            return Err(self.error(ParseError::DuplicateKey(key, String::new()), pos));
        }
        map.insert(key, value);
        Ok(())
    }

    fn parse_primitive(&self, span: Span) -> Result<Value> {
        let raw = span.slice(self.text);
        if let Some(body) = string_literal_body(raw) {
            return Ok(Value::String(body.to_string()));
        }
        if let Some(n) = parse_number(raw) {
            return Ok(Value::Number(n));
        }
        match raw {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            _ => Err(self.error(
                ParseError::UnknownPrimitive(raw.to_string(), String::new()),
                span.begin,
            )),
        }
    }
}

/// Content of `raw` if it is exactly one quoted string literal.
fn string_literal_body(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix('"')?.strip_suffix('"')?;
    let mut escaped = false;
    for c in body.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return None;
        }
    }
    // A trailing backslash escapes what looked like the closing quote
    if escaped {
        return None;
    }
    Some(body)
}

/// `-?[0-9]+(\.[0-9]+)?`, always read as `f64`.
///
/// Digit runs too large for a finite `f64` are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int) || !frac.map_or(true, all_digits) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}
