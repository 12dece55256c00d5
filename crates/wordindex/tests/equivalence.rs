//! Property tests: the NFA (with and without lambdas) and the DFA built
//! from it fire the same actions, in the same order, for any vocabulary and
//! any input. Scanning is repeatable after `reset`, and construction is
//! deterministic.

use std::cell::RefCell;

use proptest::prelude::*;
use wordindex::Indexer;
use wordindex_fa::{ActionId, Automaton, DfaEngine, Nfa, NfaEngine, eliminate_lambdas};

// Small alphabets keep shared prefixes, duplicates and case variants common.
const WORD_CHARS: &[char] = &['a', 'c', 't', 's', 'A', 'C', 'T', 'ä'];
const TEXT_CHARS: &[char] = &[
    'a', 'c', 't', 's', 'x', 'A', 'C', 'T', 'Ä', 'ä', ' ', '\n', ',', '.', '<', '>',
];

// ============================================================================
// Generators
// ============================================================================

fn arb_word() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORD_CHARS), 1..5)
        .prop_map(|chars| chars.into_iter().collect())
}

fn arb_vocabulary() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_word(), 0..8)
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TEXT_CHARS), 0..120)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Automaton with one action per word, duplicates included.
fn build_nfa(words: &[String]) -> Nfa {
    let mut nfa = Nfa::new();
    for (i, word) in words.iter().enumerate() {
        nfa.add_word(word, ActionId::new(i as u32)).unwrap();
    }
    nfa
}

fn fired_by_dfa(indexer: &Indexer, text: &str) -> Vec<ActionId> {
    let mut fired = Vec::new();
    let mut engine = DfaEngine::new(indexer.dfa(), |a: ActionId| fired.push(a));
    engine.consume_str(text);
    drop(engine);
    fired
}

fn fired_by_nfa(nfa: &Nfa, text: &str) -> Vec<ActionId> {
    let mut fired = Vec::new();
    let mut engine = NfaEngine::new(nfa, |a: ActionId| fired.push(a));
    engine.consume_str(text);
    drop(engine);
    fired
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn dfa_matches_nfa(words in arb_vocabulary(), text in arb_text()) {
        let nfa = build_nfa(&words);
        let lambda_free = eliminate_lambdas(&nfa).unwrap();
        let dfa = wordindex_fa::full_determinize(&nfa).unwrap();

        let by_raw = fired_by_nfa(&nfa, &text);
        let by_lambda_free = fired_by_nfa(&lambda_free, &text);
        let mut by_dfa = Vec::new();
        let mut engine = DfaEngine::new(&dfa, |a: ActionId| by_dfa.push(a));
        engine.consume_str(&text);
        drop(engine);

        prop_assert_eq!(&by_raw, &by_lambda_free);
        prop_assert_eq!(&by_raw, &by_dfa);
    }

    #[test]
    fn indexer_matches_nfa(words in arb_vocabulary(), text in arb_text()) {
        let indexer = Indexer::new(&words).unwrap();
        prop_assert_eq!(
            fired_by_dfa(&indexer, &text),
            fired_by_nfa(indexer.nfa(), &text)
        );
    }

    #[test]
    fn reset_makes_scans_repeatable(
        words in arb_vocabulary(),
        prefix in arb_text(),
        text in arb_text(),
    ) {
        let indexer = Indexer::new(&words).unwrap();
        let fired = RefCell::new(Vec::new());
        let mut engine = DfaEngine::new(indexer.dfa(), |a: ActionId| fired.borrow_mut().push(a));

        // Leave the engine anywhere, including inside a tag
        engine.consume_str(&prefix);
        let mut runs = Vec::new();
        for _ in 0..2 {
            engine.reset();
            fired.borrow_mut().clear();
            engine.consume_str(&text);
            runs.push(fired.borrow().clone());
        }
        drop(engine);

        prop_assert_eq!(&runs[0], &runs[1]);
        prop_assert_eq!(&runs[0], &fired_by_dfa(&indexer, &text));
    }

    #[test]
    fn construction_is_deterministic(words in arb_vocabulary()) {
        let first = Indexer::new(&words).unwrap();
        let second = Indexer::new(&words).unwrap();
        prop_assert_eq!(first.nfa().states(), second.nfa().states());
        prop_assert_eq!(first.dfa().states(), second.dfa().states());
    }

    #[test]
    fn only_whole_tokens_match(word in arb_word(), junk in "[xyz]{1,3}") {
        let indexer = Indexer::new([&word]).unwrap();
        let glued = format!("{junk}{word} {word}{junk} {word}.");
        prop_assert_eq!(fired_by_dfa(&indexer, &glued), vec![ActionId::new(0)]);
    }
}

#[test]
fn unicode_words_use_simple_uppercase() {
    let indexer = Indexer::new(["äiti", "straße"]).unwrap();
    let fired = fired_by_dfa(&indexer, "äiti Äiti ÄITI, straße STRASSE Straße.");
    let aiti = ActionId::new(0);
    let strasse = ActionId::new(1);
    assert_eq!(fired.iter().filter(|&&a| a == aiti).count(), 3);
    // `ß` uppercases to `SS` and only the first `S` is kept, so `STRASSE`
    // is a different token
    assert_eq!(fired.iter().filter(|&&a| a == strasse).count(), 2);
}
