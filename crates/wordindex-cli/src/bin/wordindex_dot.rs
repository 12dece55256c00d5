// wordindex-dot: Export the automaton for a word list as Graphviz.
//
// Reads words from stdin (one per line) and writes the DFA (default) or
// the NFA with its lambda transitions to stdout.
//
// Usage:
//   wordindex-dot [--nfa | --dfa] < words.txt | dot -Tsvg > automaton.svg

use std::io::{self, BufWriter};

use wordindex::Indexer;
use wordindex_cli::dot;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if wordindex_cli::wants_help(&args) {
        println!("wordindex-dot: Export the automaton for a word list as Graphviz.");
        println!();
        println!("Usage: wordindex-dot [--nfa | --dfa] < words.txt");
        println!();
        println!("Reads words from stdin (one per line) and writes a dot graph to stdout.");
        println!("End states are drawn as double circles, fallback edges are dashed.");
        println!();
        println!("Options:");
        println!("  --nfa        Export the non-deterministic automaton (with lambdas)");
        println!("  --dfa        Export the deterministic automaton (default)");
        println!("  -h, --help   Print this help");
        return;
    }

    wordindex_cli::init_logging();

    let (nfa, args) = wordindex_cli::take_flag(&args, &["--nfa"]);
    let (dfa, args) = wordindex_cli::take_flag(&args, &["--dfa"]);
    if nfa && dfa {
        wordindex_cli::fatal("--nfa and --dfa are mutually exclusive");
    }
    if let Some(arg) = args.first() {
        wordindex_cli::fatal(&format!("unexpected argument {arg}"));
    }

    let words = wordindex_cli::read_words_from(io::stdin().lock())
        .unwrap_or_else(|e| wordindex_cli::fatal(&format!("error reading stdin: {e}")));
    let indexer = Indexer::new(&words).unwrap_or_else(|e| wordindex_cli::fatal(&e.to_string()));

    let out = BufWriter::new(io::stdout().lock());
    let written = if nfa {
        dot::write_nfa(indexer.nfa(), out)
    } else {
        dot::write_dfa(indexer.dfa(), out)
    };
    if let Err(e) = written {
        wordindex_cli::fatal(&format!("error writing stdout: {e}"));
    }
}
