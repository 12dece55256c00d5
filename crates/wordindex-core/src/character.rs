// Token delimiters and case folding for word tokens

// ---------------------------------------------------------------------------
// Token delimiters
// ---------------------------------------------------------------------------

/// Characters that end a word token: space, newline, comma and period.
pub const BOUNDARY_CHARS: &[char] = &[' ', '\n', ',', '.'];

/// Character that opens a markup tag. Everything up to [`TAG_CLOSE`] is skipped.
pub const TAG_OPEN: char = '<';

/// Character that closes a markup tag.
pub const TAG_CLOSE: char = '>';

// ---------------------------------------------------------------------------
// Simple case conversion
//
// `char::to_uppercase` yields an iterator because a few characters expand to
// several (e.g. `ß` -> `SS`). The matcher works on single characters, so only
// the first character of the mapping is kept; characters without an
// uppercase form map to themselves.
// ---------------------------------------------------------------------------

/// Convert a character to uppercase using one-to-one mapping.
#[inline]
pub fn simple_upper(c: char) -> char {
    let mut iter = c.to_uppercase();
    iter.next().unwrap_or(c)
}

/// Uppercase every character of a word with [`simple_upper`].
pub fn normalize_word(word: &str) -> Vec<char> {
    word.chars().map(simple_upper).collect()
}
