// wordindex: Count vocabulary words in every document under a directory.
//
// Scans files with the given extension (default: html) recursively, skipping
// anything between `<` and `>`, and writes the counts to DIR/index.txt:
//
//   word
//   document
//   count
//   (one document/count pair per document the word occurs in)
//   <blank line>
//
// Usage:
//   wordindex DIR WORDS.txt [OPTIONS]
//
// Options:
//   --dot                   Also write DIR/nfa.dot and DIR/dfa.dot
//   -j, --workers N         Worker threads (0 = all CPUs, 1 = no pool)
//   -e, --extension EXT     Document extension (default: html)
//   -o, --output FILE       Index file name inside DIR (default: index.txt)
//   -h, --help              Print help
//
// Environment:
//   WORDINDEX_WORKERS       Default for --workers
//   RUST_LOG                Log filter (e.g. `debug`)

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use wordindex::Indexer;
use wordindex_cli::dot;

fn print_help() {
    println!("wordindex: Count vocabulary words in every document under a directory.");
    println!();
    println!("Usage: wordindex DIR WORDS.txt [OPTIONS]");
    println!();
    println!("WORDS.txt holds one word per line; it is looked up as given, then in DIR.");
    println!("Lines are trimmed and blank lines skipped. A word containing a space,");
    println!("comma, period, '<' or '>' cannot match and stops the run with an error.");
    println!("Writes DIR/index.txt: each word, then a document line and a count line");
    println!("per document it occurs in, then a blank line.");
    println!();
    println!("Options:");
    println!("  --dot                   Also write DIR/nfa.dot and DIR/dfa.dot");
    println!("  -j, --workers N         Worker threads (0 = all CPUs, 1 = no pool)");
    println!("  -e, --extension EXT     Document extension (default: html)");
    println!("  -o, --output FILE       Index file name inside DIR (default: index.txt)");
    println!("  -h, --help              Print this help");
    println!();
    println!("Environment:");
    println!("  WORDINDEX_WORKERS       Default for --workers");
    println!("  RUST_LOG                Log filter (e.g. debug)");
}

fn write_dot_files(dir: &Path, indexer: &Indexer) -> Result<(), String> {
    let nfa_path = dir.join("nfa.dot");
    let file = File::create(&nfa_path)
        .map_err(|e| format!("failed to create {}: {}", nfa_path.display(), e))?;
    dot::write_nfa(indexer.nfa(), BufWriter::new(file))
        .map_err(|e| format!("failed to write {}: {}", nfa_path.display(), e))?;

    let dfa_path = dir.join("dfa.dot");
    let file = File::create(&dfa_path)
        .map_err(|e| format!("failed to create {}: {}", dfa_path.display(), e))?;
    dot::write_dfa(indexer.dfa(), BufWriter::new(file))
        .map_err(|e| format!("failed to write {}: {}", dfa_path.display(), e))
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if wordindex_cli::wants_help(&args) {
        print_help();
        return;
    }

    wordindex_cli::init_logging();

    let (options, positional) =
        wordindex_cli::ScanOptions::from_args(&args).unwrap_or_else(|e| wordindex_cli::fatal(&e));
    let [dir, words_file] = positional.as_slice() else {
        wordindex_cli::fatal("expected DIR and WORDS.txt (see --help)");
    };

    let dir = PathBuf::from(dir);
    if !dir.is_dir() {
        wordindex_cli::fatal(&format!("{} is not a directory", dir.display()));
    }

    let words_path = wordindex_cli::resolve_word_list(&dir, words_file)
        .unwrap_or_else(|e| wordindex_cli::fatal(&e));
    let words = wordindex_cli::read_words(&words_path).unwrap_or_else(|e| wordindex_cli::fatal(&e));
    let indexer = Indexer::new(&words).unwrap_or_else(|e| wordindex_cli::fatal(&e.to_string()));
    log::info!(
        "{} words from {}, {} DFA states",
        indexer.words().len(),
        words_path.display(),
        indexer.dfa().len()
    );

    if options.dot {
        write_dot_files(&dir, &indexer).unwrap_or_else(|e| wordindex_cli::fatal(&e));
    }

    let output = dir.join(&options.output);
    let documents: Vec<_> = wordindex_cli::find_documents(&dir, &options.extension)
        .unwrap_or_else(|e| wordindex_cli::fatal(&e))
        .into_iter()
        .filter(|doc| Path::new(&doc.name) != Path::new(&options.output))
        .collect();
    log::info!(
        "{} .{} documents under {}",
        documents.len(),
        options.extension,
        dir.display()
    );

    let result = if options.workers == 1 {
        indexer.index_documents(&documents)
    } else {
        indexer.par_index_documents(&documents, options.workers)
    };
    let index = result.unwrap_or_else(|e| wordindex_cli::fatal(&e.to_string()));

    wordindex_cli::write_index(&output, &index).unwrap_or_else(|e| wordindex_cli::fatal(&e));
    log::info!("wrote {} words to {}", index.len(), output.display());
}
