// Graphviz export of automaton states.
//
// End states are drawn as double circles. Edges between the same pair of
// states are merged into one edge labelled `A/B/...`; fallback edges are
// dashed and unlabelled.

use std::io::{self, Write};

use wordindex_fa::{Dfa, Nfa, StateRecord, Symbol};

/// Printable form of a transition label.
pub trait EdgeLabel {
    fn render(&self) -> String;
}

impl EdgeLabel for char {
    fn render(&self) -> String {
        match *self {
            ' ' => "␣".to_string(),
            '\n' => "\\\\n".to_string(),
            '\t' => "\\\\t".to_string(),
            '"' => "\\\"".to_string(),
            '\\' => "\\\\".to_string(),
            c => c.to_string(),
        }
    }
}

impl EdgeLabel for Symbol {
    fn render(&self) -> String {
        match self {
            Symbol::Lambda => "λ".to_string(),
            Symbol::Char(c) => c.render(),
        }
    }
}

pub fn write_nfa<W: Write>(nfa: &Nfa, out: W) -> io::Result<()> {
    write_records(&nfa.states(), out)
}

pub fn write_dfa<W: Write>(dfa: &Dfa, out: W) -> io::Result<()> {
    write_records(&dfa.states(), out)
}

pub fn write_records<L: EdgeLabel, W: Write>(
    records: &[StateRecord<L>],
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "digraph {{")?;
    writeln!(out, "    rankdir=LR;")?;

    for record in records {
        let shape = if record.is_end { "doublecircle" } else { "circle" };
        writeln!(
            out,
            "    node [shape={shape}] Node{id} [label=\"{id}\"];",
            id = record.id
        )?;
    }
    writeln!(out)?;

    for record in records {
        // (destination, labels) in order of first appearance
        let mut edges: Vec<(usize, Vec<String>)> = Vec::new();
        for (label, to) in &record.transitions {
            match edges.iter_mut().find(|(dest, _)| dest == to) {
                Some((_, labels)) => labels.push(label.render()),
                None => edges.push((*to, vec![label.render()])),
            }
        }
        for (to, labels) in edges {
            writeln!(
                out,
                "    Node{} -> Node{} [label=\"{}\"];",
                record.id,
                to,
                labels.join("/")
            )?;
        }
        if let Some(to) = record.default_state {
            writeln!(out, "    Node{} -> Node{} [style=dashed];", record.id, to)?;
        }
    }

    writeln!(out, "}}")?;
    out.flush()
}
