//! Finite automata for whole-word matching in marked-up text.
//!
//! A vocabulary is compiled into a non-deterministic automaton whose paths
//! spell each word between two token boundaries, with markup (`<...>`)
//! skipped and unmatched tokens routed to a resynchronizing error state.
//! The automaton is then made lambda-free and determinized, so that
//! scanning costs one table lookup per character.
//!
//! # Architecture
//!
//! - [`config`] -- Delimiter configuration (boundaries, tag characters)
//! - [`state`] -- Arena state model shared by both automaton shapes
//! - [`action`] -- Action handles, sinks and callback tables
//! - [`nfa`] -- Word insertion into the non-deterministic automaton
//! - [`closure`] -- Lambda closures and lambda elimination
//! - [`dfa`] -- Powerset construction
//! - [`runtime`] -- Character-by-character engines for both shapes
//! - [`walk`] -- Enumeration of reachable states for export tools
//!
//! ```
//! use wordindex_fa::{Automaton, ActionId, DfaEngine, Nfa, full_determinize};
//!
//! let mut nfa = Nfa::new();
//! nfa.add_word("cat", ActionId::new(0)).unwrap();
//! let dfa = full_determinize(&nfa).unwrap();
//!
//! let mut hits = 0;
//! let mut engine = DfaEngine::new(&dfa, |_: ActionId| hits += 1);
//! engine.consume_str("Cat <b>cat</b> concatenate cat.");
//! drop(engine);
//! assert_eq!(hits, 2);
//! ```

pub mod action;
pub mod closure;
pub mod config;
pub mod dfa;
pub mod nfa;
pub mod runtime;
pub mod state;
pub mod walk;

pub use action::{ActionId, ActionSink, ActionTable};
pub use closure::{eliminate_lambdas, lambda_closure};
pub use config::MatchConfig;
pub use dfa::{Dfa, determinize, full_determinize};
pub use nfa::Nfa;
pub use runtime::{DfaEngine, NfaEngine};
pub use state::{DState, NState, State, StateId, Symbol};
pub use walk::StateRecord;

/// Error type for automaton construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaError {
    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },
    #[error("invalid delimiter configuration: {0}")]
    InvalidConfig(&'static str),
    /// A state of the arena cannot be reached from the initial state.
    /// Construction never produces such states; this indicates a defect.
    #[error("state {0} is not reachable from the initial state")]
    UnreachableState(StateId),
}

/// Character-driven automaton interface, shared by the NFA and DFA engines.
///
/// `consume` is the only operation that moves the automaton; the stream
/// helpers are plain loops over it. Both engines take `&mut self`, so one
/// instance can never be fed from two places at once.
pub trait Automaton {
    /// Advance by one character, firing the actions of any word completed by it.
    fn consume(&mut self, c: char);

    /// Feed every character of `chars` in order.
    fn consume_stream<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = char>,
        Self: Sized,
    {
        for c in chars {
            self.consume(c);
        }
    }

    /// Feed every character of `text` in order.
    fn consume_str(&mut self, text: &str)
    where
        Self: Sized,
    {
        self.consume_stream(text.chars());
    }

    /// Return to the initial state. The transition graph is left untouched.
    fn reset(&mut self);
}
