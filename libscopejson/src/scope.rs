//! Phase 2: Scope Resolver
//!
//! Scans the compacted text once and records, for every opening bracket,
//! the distance to its matching closer. The parser consults this table to
//! step over a nested container in one move instead of rescanning it, which
//! is what keeps the commas inside nested containers from being taken as
//! separators.
//!
//! Brackets inside string literals are not structural and are skipped, using
//! the same quote tracking as the preprocessor.

use std::collections::HashMap;

use crate::error::{ParseContext, ParseError, Result};
use crate::preprocess::QuoteTracker;

/// A half-open byte range `[begin, end)` of the compacted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "span {}..{} is inverted", begin, end);
        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The text covered by this span.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.begin..self.end]
    }
}

/// Bracket kinds tracked on the order stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Square,
    Curly,
}

/// Map from an opening bracket's position to the distance to its closer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTable {
    skips: HashMap<usize, usize>,
}

impl ScopeTable {
    /// Distance from the opener at `pos` to its closer, if `pos` opens a
    /// structural container.
    pub fn skip_at(&self, pos: usize) -> Option<usize> {
        self.skips.get(&pos).copied()
    }

    /// The full container span opened at `pos`, closer included.
    pub fn span_at(&self, pos: usize) -> Option<Span> {
        self.skip_at(pos).map(|skip| Span::new(pos, pos + skip + 1))
    }

    pub fn len(&self) -> usize {
        self.skips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skips.is_empty()
    }

    /// All `(opener, skip)` entries ordered by opener position.
    pub fn entries(&self) -> Vec<(usize, usize)> {
        let mut entries: Vec<(usize, usize)> =
            self.skips.iter().map(|(&open, &skip)| (open, skip)).collect();
        entries.sort_unstable();
        entries
    }

    fn record(&mut self, open: usize, close: usize) {
        self.skips.insert(open, close - open);
    }
}

/// Resolve bracket scopes in compacted text.
pub fn resolve_scopes(text: &str) -> Result<ScopeTable> {
    resolve_scopes_in(text, &ParseContext::default())
}

/// Resolve bracket scopes, reporting errors against `ctx`.
pub(crate) fn resolve_scopes_in(text: &str, ctx: &ParseContext) -> Result<ScopeTable> {
    let mut table = ScopeTable::default();
    let mut square_stack: Vec<usize> = Vec::new();
    let mut curly_stack: Vec<usize> = Vec::new();
    let mut order_stack: Vec<Bracket> = Vec::new();
    let mut quotes = QuoteTracker::default();

    for (pos, b) in text.bytes().enumerate() {
        if quotes.step_byte(b) {
            continue;
        }
        match b {
            b'[' => {
                square_stack.push(pos);
                order_stack.push(Bracket::Square);
            }
            b'{' => {
                curly_stack.push(pos);
                order_stack.push(Bracket::Curly);
            }
            b']' => close(
                &mut table,
                &mut square_stack,
                &mut order_stack,
                Bracket::Square,
                pos,
                ctx,
            )?,
            b'}' => close(
                &mut table,
                &mut curly_stack,
                &mut order_stack,
                Bracket::Curly,
                pos,
                ctx,
            )?,
            _ => {}
        }
    }

    // Report the innermost unmatched opener
    if let Some(&open) = square_stack.iter().chain(curly_stack.iter()).max() {
        return Err(ParseError::UnbalancedBrackets(String::new()).with_location(ctx, open));
    }

    tracing::debug!(len = text.len(), scopes = table.len(), "resolved bracket scopes");
    Ok(table)
}

/// Match a closer at `pos` against the innermost open bracket.
fn close(
    table: &mut ScopeTable,
    kind_stack: &mut Vec<usize>,
    order_stack: &mut Vec<Bracket>,
    kind: Bracket,
    pos: usize,
    ctx: &ParseContext,
) -> Result<()> {
    match order_stack.last() {
        None => {
            return Err(ParseError::UnbalancedBrackets(String::new()).with_location(ctx, pos));
        }
        Some(&open_kind) if open_kind != kind => {
            return Err(ParseError::MismatchedBracketType(String::new()).with_location(ctx, pos));
        }
        Some(_) => {}
    }
    // The order stack's top is `kind`, so the kind stack has an entry too
    let open = kind_stack.pop();
    debug_assert!(open.is_some(), "order stack out of step with kind stack");
    order_stack.pop();
    if let Some(open) = open {
        table.record(open, pos);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_properly_nested(text: &str, table: &ScopeTable) {
        let bytes = text.as_bytes();
        let entries = table.entries();
        for &(open, skip) in &entries {
            let pair = (bytes[open], bytes[open + skip]);
            assert!(pair == (b'[', b']') || pair == (b'{', b'}'), "bad pair at {}", open);
        }
        for &(a, a_skip) in &entries {
            for &(b, b_skip) in &entries {
                let (a_end, b_end) = (a + a_skip, b + b_skip);
                let disjoint = a_end < b || b_end < a;
                let nested = (a < b && b_end < a_end) || (b < a && a_end < b_end) || a == b;
                assert!(disjoint || nested, "{}..{} overlaps {}..{}", a, a_end, b, b_end);
            }
        }
    }

    #[test]
    fn test_nested_scopes() {
        let text = r#"[[],[null,true],["hello",["WORLD","!"]]]"#;
        let table = resolve_scopes(text).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.skip_at(0), Some(text.len() - 1));
        assert_eq!(table.skip_at(1), Some(1));
        assert_eq!(table.span_at(4), Some(Span::new(4, 15)));
        assert_eq!(table.skip_at(2), None);
        assert_properly_nested(text, &table);
    }

    #[test]
    fn test_mixed_scopes() {
        let text = r#"{"menu":{"items":[{"v":1},{"v":[2,3]}]}}"#;
        let table = resolve_scopes(text).unwrap();
        assert_eq!(table.len(), 6);
        assert_properly_nested(text, &table);
    }

    #[test]
    fn test_no_brackets() {
        assert!(resolve_scopes("12.12").unwrap().is_empty());
    }

    #[test]
    fn test_extra_closer() {
        assert_eq!(
            resolve_scopes("[1,2]]"),
            Err(ParseError::UnbalancedBrackets(String::new()))
        );
    }

    #[test]
    fn test_missing_closer() {
        assert_eq!(
            resolve_scopes("{\"a\":[1}"),
            Err(ParseError::MismatchedBracketType(String::new()))
        );
        assert_eq!(
            resolve_scopes("[[1]"),
            Err(ParseError::UnbalancedBrackets(String::new()))
        );
    }

    #[test]
    fn test_closer_check_order() {
        let kind = |text: &str| resolve_scopes(text).unwrap_err().kind();
        assert_eq!(kind("]"), "unbalanced-brackets");
        assert_eq!(kind("[]}"), "unbalanced-brackets");
        assert_eq!(kind("[}"), "mismatched-bracket-type");
        assert_eq!(kind("{[]]"), "mismatched-bracket-type");
    }

    #[test]
    fn test_mismatched_closer() {
        assert_eq!(
            resolve_scopes("[1,2}"),
            Err(ParseError::MismatchedBracketType(String::new()))
        );
        assert_eq!(
            resolve_scopes("{[}]"),
            Err(ParseError::MismatchedBracketType(String::new()))
        );
    }

    #[test]
    fn test_brackets_inside_strings_are_ignored() {
        let text = r#"["a]",{"k}":"[\"]"}]"#;
        let table = resolve_scopes(text).unwrap();
        assert_eq!(table.entries(), vec![(0, text.len() - 1), (6, 12)]);
    }

    #[test]
    fn test_location_reported_with_filename() {
        let ctx = ParseContext::new(Some("x.json"));
        let err = resolve_scopes_in("[[1]", &ctx).unwrap_err();
        assert_eq!(err.to_string(), "Unbalanced brackets at offset 0 of <x.json>");
    }
}
