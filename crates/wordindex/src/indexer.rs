// Vocabulary compilation and document aggregation

use std::path::PathBuf;

use hashbrown::HashSet;
use wordindex_core::character::normalize_word;
use wordindex_core::index::WordIndex;
use wordindex_fa::{ActionId, Dfa, MatchConfig, Nfa, full_determinize};

use crate::IndexError;
use crate::scanner::Scanner;

/// A document to index: the name it is recorded under and where to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub path: PathBuf,
}

impl Document {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Compiled vocabulary.
///
/// Holds the source NFA (kept for export) and the DFA used for scanning.
/// Both are read-only after construction; scanners borrow them.
#[derive(Debug, Clone)]
pub struct Indexer {
    words: Vec<String>,
    nfa: Nfa,
    dfa: Dfa,
}

impl Indexer {
    /// Compile `words` with the default delimiters.
    pub fn new<I, S>(words: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(words, MatchConfig::default())
    }

    /// Compile `words` with custom delimiters.
    ///
    /// Words equal after uppercasing are kept once, under their first
    /// spelling. Empty words and words containing a delimiter are rejected,
    /// as is a delimiter set that cannot separate tokens.
    pub fn with_config<I, S>(words: I, config: MatchConfig) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nfa = Nfa::with_config(config)?;
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for word in words {
            let word = word.as_ref();
            if !seen.insert(normalize_word(word)) {
                log::debug!("ignoring duplicate word {word:?}");
                continue;
            }
            nfa.add_word(word, ActionId::new(kept.len() as u32))?;
            kept.push(word.to_string());
        }

        let dfa = full_determinize(&nfa)?;
        log::debug!(
            "compiled {} words: {} NFA states, {} DFA states",
            kept.len(),
            nfa.len(),
            dfa.len()
        );

        Ok(Self {
            words: kept,
            nfa,
            dfa,
        })
    }

    /// Vocabulary in registration order; a word's position is its action id.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// A fresh scanner with zeroed counters.
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.dfa, &self.words)
    }

    /// Index `documents` one after another on the calling thread.
    pub fn index_documents(&self, documents: &[Document]) -> Result<WordIndex, IndexError> {
        let mut index = WordIndex::new();
        let mut scanner = self.scanner();
        for document in documents {
            scanner.scan_document(document, &mut index)?;
        }
        log::debug!(
            "indexed {} documents, {} words found",
            documents.len(),
            index.len()
        );
        Ok(index)
    }

    /// Index `documents` on a pool of `workers` threads (0 picks the number
    /// of CPUs). Each worker owns a scanner; the automaton is shared.
    ///
    /// The result equals that of [`index_documents`](Self::index_documents).
    #[cfg(feature = "parallel")]
    pub fn par_index_documents(
        &self,
        documents: &[Document],
        workers: usize,
    ) -> Result<WordIndex, IndexError> {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        log::debug!(
            "indexing {} documents on {} workers",
            documents.len(),
            pool.current_num_threads()
        );

        pool.install(|| {
            documents
                .par_iter()
                .map_init(
                    || self.scanner(),
                    |scanner, document| {
                        let mut index = WordIndex::new();
                        scanner.scan_document(document, &mut index)?;
                        Ok(index)
                    },
                )
                .try_reduce(WordIndex::new, |mut acc, index| {
                    acc.merge(index);
                    Ok(acc)
                })
        })
    }
}
