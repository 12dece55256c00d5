//! Whole-word occurrence indexing over marked-up documents.
//!
//! An [`Indexer`] compiles a vocabulary into a deterministic automaton once
//! and then hands out [`Scanner`]s that count how often each word occurs as
//! a complete token outside markup. Per-document counts are collected into a
//! [`WordIndex`].
//!
//! # Architecture
//!
//! - [`counter`] -- Per-word occurrence counters driven by automaton actions
//! - [`scanner`] -- Document scanning with a reusable engine
//! - [`indexer`] -- Vocabulary compilation and document aggregation
//!
//! ```
//! use wordindex::Indexer;
//! use wordindex_core::index::WordIndex;
//!
//! let indexer = Indexer::new(["cat", "dog"]).unwrap();
//! let mut index = WordIndex::new();
//! let mut scanner = indexer.scanner();
//! scanner.scan_str("<p>Cat, dog. CAT hotdog</p>\n");
//! scanner.finish_document("pets.html", &mut index);
//!
//! assert_eq!(index.count("cat", "pets.html"), 2);
//! assert_eq!(index.count("dog", "pets.html"), 1);
//! ```

pub mod counter;
pub mod indexer;
pub mod scanner;

pub use counter::WordCounter;
pub use indexer::{Document, Indexer};
pub use scanner::Scanner;
pub use wordindex_core::index::WordIndex;

use std::path::PathBuf;

use wordindex_fa::FaError;

/// Error type for indexing.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Automaton(#[from] FaError),
    #[error("failed to read {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "parallel")]
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
