// Per-word occurrence counters

use wordindex_fa::{ActionId, ActionSink};

/// Counts completed matches per word.
///
/// The action handle of each word is its position in the vocabulary, so
/// counting is a single increment.
#[derive(Debug, Clone)]
pub struct WordCounter<'a> {
    words: &'a [String],
    counts: Vec<u64>,
}

impl<'a> WordCounter<'a> {
    pub fn new(words: &'a [String]) -> Self {
        Self {
            words,
            counts: vec![0; words.len()],
        }
    }

    /// Count for the word registered under `action`.
    pub fn get(&self, action: ActionId) -> u64 {
        self.counts.get(action.index()).copied().unwrap_or(0)
    }

    /// Sum over all words.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Words seen at least once, with their counts, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u64)> + '_ {
        self.words
            .iter()
            .zip(&self.counts)
            .filter(|&(_, &count)| count > 0)
            .map(|(word, &count)| (word.as_str(), count))
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        self.counts.fill(0);
    }
}

impl ActionSink for WordCounter<'_> {
    #[inline]
    fn fire(&mut self, action: ActionId) {
        if let Some(count) = self.counts.get_mut(action.index()) {
            *count += 1;
        }
    }
}
