// Delimiter configuration for automaton construction

use wordindex_core::character::{BOUNDARY_CHARS, TAG_CLOSE, TAG_OPEN, simple_upper};

use crate::FaError;

/// Characters with structural meaning to the word matcher.
///
/// The default matches plain text and HTML: words end at a space, newline,
/// comma or period, and markup runs from `<` to `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Characters that end a word token.
    pub boundaries: Vec<char>,
    /// Character that starts skipped markup.
    pub tag_open: char,
    /// Character that ends skipped markup.
    pub tag_close: char,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            boundaries: BOUNDARY_CHARS.to_vec(),
            tag_open: TAG_OPEN,
            tag_close: TAG_CLOSE,
        }
    }
}

impl MatchConfig {
    /// Uppercase and deduplicate the delimiters so they compare equal to
    /// normalized input characters.
    pub(crate) fn normalized(mut self) -> Self {
        for c in &mut self.boundaries {
            *c = simple_upper(*c);
        }
        self.boundaries.sort_unstable();
        self.boundaries.dedup();
        self.tag_open = simple_upper(self.tag_open);
        self.tag_close = simple_upper(self.tag_close);
        self
    }

    /// Check that the delimiters can delimit anything: at least one
    /// boundary, and tag characters distinct from each other and from every
    /// boundary. Call on a normalized config.
    pub(crate) fn validate(&self) -> Result<(), FaError> {
        if self.boundaries.is_empty() {
            return Err(FaError::InvalidConfig("no boundary characters"));
        }
        if self.tag_open == self.tag_close {
            return Err(FaError::InvalidConfig("tag open and close are the same character"));
        }
        if self.boundaries.contains(&self.tag_open) || self.boundaries.contains(&self.tag_close) {
            return Err(FaError::InvalidConfig("a tag character is also a boundary"));
        }
        Ok(())
    }

    /// True for boundaries and both tag characters.
    pub fn is_delimiter(&self, c: char) -> bool {
        c == self.tag_open || c == self.tag_close || self.boundaries.contains(&c)
    }
}
