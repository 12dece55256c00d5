// Character-by-character engines for both automaton shapes
//
// An engine borrows a finished graph and owns only its current position and
// its action sink. The graph is never mutated, so any number of engines can
// run over the same `Nfa` or `Dfa`, including from different threads.

use wordindex_core::character::simple_upper;

use crate::Automaton;
use crate::action::{ActionId, ActionSink};
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::state::StateId;

/// Simulates an [`Nfa`] by tracking every live state at once.
///
/// Used to cross-check the deterministic engine; production scanning goes
/// through [`DfaEngine`].
pub struct NfaEngine<'a, A> {
    nfa: &'a Nfa,
    current: Vec<StateId>,
    next: Vec<StateId>,
    fired: Vec<ActionId>,
    actions: A,
}

impl<'a, A: ActionSink> NfaEngine<'a, A> {
    pub fn new(nfa: &'a Nfa, actions: A) -> Self {
        Self {
            nfa,
            current: vec![nfa.init_state()],
            next: Vec::new(),
            fired: Vec::new(),
            actions,
        }
    }

    /// Currently active states, sorted.
    pub fn current_states(&self) -> &[StateId] {
        &self.current
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub fn into_actions(self) -> A {
        self.actions
    }
}

impl<A: ActionSink> Automaton for NfaEngine<'_, A> {
    /// Step every active state, then fire the end states of the new set.
    ///
    /// Actions run only after the whole new set is known, so they cannot
    /// influence which states become active.
    fn consume(&mut self, c: char) {
        let c = simple_upper(c);
        let nfa = self.nfa;

        self.next.clear();
        for &state in &self.current {
            nfa.step(state, c, &mut self.next);
        }
        self.next.sort_unstable();
        self.next.dedup();
        std::mem::swap(&mut self.current, &mut self.next);

        self.fired.clear();
        for &state in &self.current {
            self.fired.extend_from_slice(&nfa.state(state).actions);
        }
        self.fired.sort_unstable();
        for &action in &self.fired {
            self.actions.fire(action);
        }
    }

    fn reset(&mut self) {
        self.current.clear();
        self.current.push(self.nfa.init_state());
    }
}

/// Runs a [`Dfa`] with a single current state: one lookup per character.
pub struct DfaEngine<'a, A> {
    dfa: &'a Dfa,
    current: StateId,
    actions: A,
}

impl<'a, A: ActionSink> DfaEngine<'a, A> {
    pub fn new(dfa: &'a Dfa, actions: A) -> Self {
        Self {
            dfa,
            current: dfa.init_state(),
            actions,
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn dfa(&self) -> &'a Dfa {
        self.dfa
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub fn into_actions(self) -> A {
        self.actions
    }
}

impl<A: ActionSink> Automaton for DfaEngine<'_, A> {
    #[inline]
    fn consume(&mut self, c: char) {
        let dfa = self.dfa;
        self.current = dfa.next(self.current, simple_upper(c));
        for &action in &dfa.state(self.current).actions {
            self.actions.fire(action);
        }
    }

    fn reset(&mut self) {
        self.current = self.dfa.init_state();
    }
}
