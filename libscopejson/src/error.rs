//! Error types for scope-table parsing.

use thiserror::Error;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying the input name for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    ///
    /// Offsets are byte positions in the compacted text, not in the source.
    pub fn loc_suffix(&self, offset: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at offset {} of <{}>", offset, name),
            None => String::new(),
        }
    }
}

/// Error type for parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A closer without an opener, or openers left at end of input.
    #[error("Unbalanced brackets{0}")]
    UnbalancedBrackets(String),

    /// A closer whose kind differs from the innermost open bracket.
    #[error("Mismatched bracket types{0}")]
    MismatchedBracketType(String),

    /// A value span with nothing in it.
    #[error("Empty value{0}")]
    EmptyInput(String),

    /// No colon where a key/value separator is expected.
    #[error("Invalid structure for object{0}")]
    InvalidObjectStructure(String),

    /// The text before a colon is not a quoted string.
    #[error("Invalid object key '{0}'{1}")]
    InvalidObjectKey(String, String),

    /// A span that is not a string, number, boolean or null.
    #[error("Unknown primitive '{0}'{1}")]
    UnknownPrimitive(String, String),

    /// Text after a complete top-level container.
    #[error("Unexpected extra content{0}")]
    TrailingContent(String),

    /// Containers nested deeper than the configured limit.
    #[error("Nesting deeper than {0} levels{1}")]
    NestingTooDeep(usize, String),

    /// A key repeated within one object.
    #[error("Duplicate object key \"{0}\"{1}")]
    DuplicateKey(String, String),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, offset: usize) -> Self {
        let suffix = ctx.loc_suffix(offset);
        match self {
            ParseError::UnbalancedBrackets(_) => ParseError::UnbalancedBrackets(suffix),
            ParseError::MismatchedBracketType(_) => ParseError::MismatchedBracketType(suffix),
            ParseError::EmptyInput(_) => ParseError::EmptyInput(suffix),
            ParseError::InvalidObjectStructure(_) => ParseError::InvalidObjectStructure(suffix),
            ParseError::InvalidObjectKey(key, _) => ParseError::InvalidObjectKey(key, suffix),
            ParseError::UnknownPrimitive(text, _) => ParseError::UnknownPrimitive(text, suffix),
            ParseError::TrailingContent(_) => ParseError::TrailingContent(suffix),
            ParseError::NestingTooDeep(limit, _) => ParseError::NestingTooDeep(limit, suffix),
            ParseError::DuplicateKey(key, _) => ParseError::DuplicateKey(key, suffix),
        }
    }

    /// Short stable name of the error kind, independent of the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::UnbalancedBrackets(_) => "unbalanced-brackets",
            ParseError::MismatchedBracketType(_) => "mismatched-bracket-type",
            ParseError::EmptyInput(_) => "empty-input",
            ParseError::InvalidObjectStructure(_) => "invalid-object-structure",
            ParseError::InvalidObjectKey(..) => "invalid-object-key",
            ParseError::UnknownPrimitive(..) => "unknown-primitive",
            ParseError::TrailingContent(_) => "trailing-content",
            ParseError::NestingTooDeep(..) => "nesting-too-deep",
            ParseError::DuplicateKey(..) => "duplicate-key",
        }
    }
}
