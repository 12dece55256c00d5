// Document scanning with a reusable engine
//
// A scanner pairs one DFA engine with one set of counters. Between
// documents both are reset, so the same scanner can walk a whole corpus
// without rebuilding anything.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};

use wordindex_core::index::WordIndex;
use wordindex_fa::{Automaton, Dfa, DfaEngine};

use crate::IndexError;
use crate::counter::WordCounter;
use crate::indexer::Document;

pub struct Scanner<'a> {
    engine: DfaEngine<'a, WordCounter<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(dfa: &'a Dfa, words: &'a [String]) -> Self {
        Self {
            engine: DfaEngine::new(dfa, WordCounter::new(words)),
        }
    }

    /// Counts for the current document so far.
    pub fn counter(&self) -> &WordCounter<'a> {
        self.engine.actions()
    }

    pub fn scan_str(&mut self, text: &str) {
        self.engine.consume_str(text);
    }

    /// Feed a reader line by line, keeping line terminators so that a word
    /// at the end of a line is still closed by the newline.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; markup files in the
    /// wild are not always clean.
    pub fn scan_reader<R: BufRead>(&mut self, mut reader: R) -> Result<(), IndexError> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            match String::from_utf8_lossy(&line) {
                Cow::Borrowed(text) => self.engine.consume_str(text),
                Cow::Owned(text) => self.engine.consume_str(&text),
            }
        }
    }

    /// Scan one document from disk and record its counts under its name.
    pub fn scan_document(
        &mut self,
        document: &Document,
        index: &mut WordIndex,
    ) -> Result<(), IndexError> {
        let file = File::open(&document.path).map_err(|source| IndexError::Document {
            path: document.path.clone(),
            source,
        })?;
        self.scan_reader(BufReader::new(file))
            .map_err(|err| match err {
                IndexError::Io(source) => IndexError::Document {
                    path: document.path.clone(),
                    source,
                },
                other => other,
            })?;
        log::trace!(
            "{}: {} matches",
            document.name,
            self.engine.actions().total()
        );
        self.finish_document(&document.name, index);
        Ok(())
    }

    /// Record the counts of the current document under `name`, then reset
    /// the counters and the engine for the next one.
    pub fn finish_document(&mut self, name: &str, index: &mut WordIndex) {
        for (word, count) in self.engine.actions().iter() {
            index.record(word, name, count);
        }
        self.engine.actions_mut().reset();
        self.engine.reset();
    }
}
