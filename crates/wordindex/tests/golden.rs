//! Golden-file tests: index small corpora and compare against the expected
//! per-document counts and the exact `index.txt` text.
//!
//! Fixtures live in `tests/golden/*.json`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use wordindex::{Indexer, WordIndex};

#[derive(Debug, Deserialize)]
struct Fixture {
    description: String,
    words: Vec<String>,
    documents: Vec<FixtureDocument>,
    expected: BTreeMap<String, BTreeMap<String, u64>>,
    index: String,
}

#[derive(Debug, Deserialize)]
struct FixtureDocument {
    name: String,
    text: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn golden_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden")
}

fn load_fixtures() -> Vec<(String, Fixture)> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(golden_dir())
        .expect("golden directory")
        .map(|entry| entry.expect("golden entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let contents = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
            let fixture: Fixture = serde_json::from_str(&contents)
                .unwrap_or_else(|e| panic!("failed to parse {}: {}", path.display(), e));
            (path.display().to_string(), fixture)
        })
        .collect()
}

fn run_fixture(fixture: &Fixture) -> WordIndex {
    let indexer = Indexer::new(&fixture.words).expect("fixture words compile");
    let mut index = WordIndex::new();
    let mut scanner = indexer.scanner();
    for document in &fixture.documents {
        scanner.scan_str(&document.text);
        scanner.finish_document(&document.name, &mut index);
    }
    index
}

fn as_map(index: &WordIndex) -> BTreeMap<String, BTreeMap<String, u64>> {
    index
        .iter()
        .map(|(word, docs)| (word.to_string(), docs.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn fixtures_are_present() {
    assert!(load_fixtures().len() >= 3);
}

#[test]
fn golden_counts() {
    for (path, fixture) in load_fixtures() {
        let index = run_fixture(&fixture);
        assert_eq!(
            as_map(&index),
            fixture.expected,
            "{path}: {}",
            fixture.description
        );
    }
}

#[test]
fn golden_index_text() {
    for (path, fixture) in load_fixtures() {
        let index = run_fixture(&fixture);
        let mut out = Vec::new();
        index.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            fixture.index,
            "{path}: {}",
            fixture.description
        );
    }
}

#[test]
fn golden_counts_line_by_line() {
    for (path, fixture) in load_fixtures() {
        let indexer = Indexer::new(&fixture.words).unwrap();
        let mut index = WordIndex::new();
        let mut scanner = indexer.scanner();
        for document in &fixture.documents {
            scanner.scan_reader(document.text.as_bytes()).unwrap();
            scanner.finish_document(&document.name, &mut index);
        }
        assert_eq!(as_map(&index), fixture.expected, "{path}");
    }
}
