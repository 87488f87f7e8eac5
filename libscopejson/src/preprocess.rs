//! Phase 1: Preprocessor
//!
//! Removes every whitespace character that sits outside a string literal.
//! String literal content, including its whitespace, is copied verbatim.
//! This phase never fails: an unterminated string simply keeps the rest of
//! the input verbatim.

/// Tracks whether a scan position is inside a string literal.
///
/// A backslash inside a string makes the following character literal, so
/// `\"` does not end the string. Escapes are recognised here only to find
/// string boundaries; they are never decoded.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteTracker {
    in_string: bool,
    escaped: bool,
}

impl QuoteTracker {
    /// Advance over one character. Returns `true` if the character belongs
    /// to a string literal, delimiting quotes included.
    pub(crate) fn step(&mut self, c: char) -> bool {
        if !self.in_string {
            if c == '"' {
                self.in_string = true;
                return true;
            }
            return false;
        }
        if self.escaped {
            self.escaped = false;
        } else if c == '\\' {
            self.escaped = true;
        } else if c == '"' {
            self.in_string = false;
        }
        true
    }

    /// Byte-oriented [`QuoteTracker::step`] for scans over ASCII structure.
    /// Continuation bytes of multi-byte characters are never quotes or
    /// backslashes, so treating them as opaque is exact.
    pub(crate) fn step_byte(&mut self, b: u8) -> bool {
        self.step(if b.is_ascii() { b as char } else { '\u{80}' })
    }

    pub(crate) fn in_string(&self) -> bool {
        self.in_string
    }
}

/// Strip whitespace outside string literals.
pub fn preprocess(source: &str) -> String {
    let mut compacted = String::with_capacity(source.len());
    let mut quotes = QuoteTracker::default();
    for c in source.chars() {
        if quotes.step(c) || !c.is_whitespace() {
            compacted.push(c);
        }
    }
    tracing::trace!(
        source_len = source.len(),
        compacted_len = compacted.len(),
        "preprocessed"
    );
    compacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_structural_whitespace() {
        assert_eq!(preprocess("  [ 1 ,\n\t2 ]\r\n"), "[1,2]");
        assert_eq!(preprocess(" { } "), "{}");
    }

    #[test]
    fn test_keeps_string_whitespace() {
        assert_eq!(
            preprocess(r#"{ "title" : "example glossary" }"#),
            r#"{"title":"example glossary"}"#
        );
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        assert_eq!(preprocess(r#"[ "a \" b" , 1 ]"#), r#"["a \" b",1]"#);
    }

    #[test]
    fn test_unterminated_string_keeps_tail() {
        assert_eq!(preprocess(r#" "open  tail "#), r#""open  tail "#);
    }

    #[test]
    fn test_idempotent() {
        let source = "{\"menu\": {\"id\": \"file\", \"popup\": [ \"New Doc\" , 1 ]}}";
        let once = preprocess(source);
        assert_eq!(preprocess(&once), once);
    }

    #[test]
    fn test_unicode_whitespace_outside_strings() {
        assert_eq!(preprocess("[\u{00A0}1,\u{2003}\"\u{2003}\"]"), "[1,\"\u{2003}\"]");
    }
}
