// Arena state model shared by the NFA and the DFA
//
// States live in a flat `Vec` and refer to each other by index, so the
// cyclic graph (every match loops back to the initial state) needs no
// shared ownership.

use hashbrown::HashMap;
use std::hash::Hash;

use crate::action::ActionId;

/// Index of a state in its automaton's arena.
pub type StateId = u32;

/// Transition label of the non-deterministic automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// Taken without consuming input.
    Lambda,
    /// Taken on an (uppercased) input character.
    Char(char),
}

/// A state with transitions keyed by `K` leading to `T`.
///
/// The key/target pair fixes the automaton shape: [`NState`] maps symbols
/// to sets of states, [`DState`] maps characters to exactly one state.
#[derive(Debug, Clone)]
pub struct State<K, T> {
    pub transitions: HashMap<K, T>,
    /// Fallback for characters without an explicit entry. A state without
    /// one stays where it is.
    pub default_state: Option<StateId>,
    /// Actions fired on entering the state, in registration order.
    pub actions: Vec<ActionId>,
}

/// Non-deterministic state: each symbol leads to a sorted set of states.
pub type NState = State<Symbol, Vec<StateId>>;

/// Deterministic state: each character leads to one state.
pub type DState = State<char, StateId>;

impl<K, T> Default for State<K, T> {
    fn default() -> Self {
        Self {
            transitions: HashMap::new(),
            default_state: None,
            actions: Vec::new(),
        }
    }
}

impl<K: Eq + Hash, T> State<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state that falls back to `default_state`.
    pub fn with_default(default_state: StateId) -> Self {
        Self {
            default_state: Some(default_state),
            ..Self::default()
        }
    }

    /// True if entering this state completes at least one word.
    #[inline]
    pub fn is_end_state(&self) -> bool {
        !self.actions.is_empty()
    }
}

impl NState {
    /// Add `target` to the set reached on `symbol`, keeping the set sorted.
    pub fn add_target(&mut self, symbol: Symbol, target: StateId) {
        let targets = self.transitions.entry(symbol).or_default();
        if let Err(pos) = targets.binary_search(&target) {
            targets.insert(pos, target);
        }
    }

    /// Targets reached on `c`, if the state has an explicit entry for it.
    #[inline]
    pub fn targets(&self, c: char) -> Option<&[StateId]> {
        self.transitions.get(&Symbol::Char(c)).map(Vec::as_slice)
    }

    /// Lambda targets of this state.
    #[inline]
    pub fn lambdas(&self) -> &[StateId] {
        self.transitions
            .get(&Symbol::Lambda)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl DState {
    /// Explicit entry on `c`, else the fallback.
    #[inline]
    pub fn next(&self, c: char) -> Option<StateId> {
        self.transitions.get(&c).copied().or(self.default_state)
    }
}
