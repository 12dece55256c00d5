// Word occurrence index: word -> {document -> count}

use std::collections::BTreeMap;
use std::io::{self, Write};

/// Aggregated occurrence counts for a vocabulary across a set of documents.
///
/// Only non-zero counts are stored. Words and documents are kept in sorted
/// order so that the written index is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordIndex {
    entries: BTreeMap<String, BTreeMap<String, u64>>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `word` in `document`. Zero counts are ignored.
    pub fn record(&mut self, word: &str, document: &str, count: u64) {
        if count == 0 {
            return;
        }
        *self
            .entries
            .entry(word.to_string())
            .or_default()
            .entry(document.to_string())
            .or_insert(0) += count;
    }

    /// Number of occurrences of `word` in `document` (0 if none were recorded).
    pub fn count(&self, word: &str, document: &str) -> u64 {
        self.entries
            .get(word)
            .and_then(|docs| docs.get(document))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of occurrences of `word` over all documents.
    pub fn total(&self, word: &str) -> u64 {
        self.entries
            .get(word)
            .map(|docs| docs.values().sum())
            .unwrap_or(0)
    }

    /// Documents containing `word`, with their counts.
    pub fn documents(&self, word: &str) -> Option<&BTreeMap<String, u64>> {
        self.entries.get(word)
    }

    /// Iterate over `(word, documents)` in word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, u64>)> {
        self.entries.iter().map(|(w, d)| (w.as_str(), d))
    }

    /// Number of words with at least one occurrence.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold another index into this one, adding counts.
    pub fn merge(&mut self, other: WordIndex) {
        for (word, docs) in other.entries {
            let target = self.entries.entry(word).or_default();
            for (doc, count) in docs {
                *target.entry(doc).or_insert(0) += count;
            }
        }
    }

    /// Write the index in its plain-text form.
    ///
    /// Each word is followed by one `document` line and one `count` line per
    /// document it occurs in, and a blank line:
    ///
    /// ```text
    /// cat
    /// a.html
    /// 2
    ///
    /// ```
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (word, docs) in &self.entries {
            writeln!(out, "{word}")?;
            for (doc, count) in docs {
                writeln!(out, "{doc}")?;
                writeln!(out, "{count}")?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_count() {
        let mut index = WordIndex::new();
        index.record("cat", "a.html", 2);
        index.record("cat", "b.html", 1);
        index.record("cat", "a.html", 1);

        assert_eq!(index.count("cat", "a.html"), 3);
        assert_eq!(index.count("cat", "b.html"), 1);
        assert_eq!(index.count("cat", "c.html"), 0);
        assert_eq!(index.count("dog", "a.html"), 0);
        assert_eq!(index.total("cat"), 4);
    }

    #[test]
    fn zero_counts_are_not_stored() {
        let mut index = WordIndex::new();
        index.record("cat", "a.html", 0);
        assert!(index.is_empty());
        assert!(index.documents("cat").is_none());
    }

    #[test]
    fn merge_adds_counts() {
        let mut left = WordIndex::new();
        left.record("cat", "a.html", 1);
        let mut right = WordIndex::new();
        right.record("cat", "a.html", 2);
        right.record("dog", "b.html", 5);

        left.merge(right);
        assert_eq!(left.count("cat", "a.html"), 3);
        assert_eq!(left.count("dog", "b.html"), 5);
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn text_format() {
        let mut index = WordIndex::new();
        index.record("dog", "b.html", 1);
        index.record("cat", "b.html", 4);
        index.record("cat", "a.html", 2);

        let mut out = Vec::new();
        index.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "cat\na.html\n2\nb.html\n4\n\ndog\nb.html\n1\n\n"
        );
    }
}
