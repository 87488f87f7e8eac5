//! Parse configuration.

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What to do when an object repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The later value replaces the earlier one, keeping its position.
    #[default]
    Overwrite,
    /// Fail with [`crate::ParseError::DuplicateKey`].
    Reject,
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Deepest allowed container nesting; a bare scalar has depth 0.
    pub max_depth: usize,
    pub duplicate_keys: DuplicateKeys,
    /// Name used in error locations. Errors carry no location without it.
    pub filename: Option<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_duplicate_keys(mut self, duplicate_keys: DuplicateKeys) -> Self {
        self.duplicate_keys = duplicate_keys;
        self
    }

    pub fn with_filename(mut self, filename: Option<&str>) -> Self {
        self.filename = filename.map(String::from);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_keys: DuplicateKeys::default(),
            filename: None,
        }
    }
}
