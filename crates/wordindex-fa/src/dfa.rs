// Deterministic automaton and powerset construction

use hashbrown::HashMap;

use crate::FaError;
use crate::action::ActionId;
use crate::closure::eliminate_lambdas;
use crate::nfa::Nfa;
use crate::state::{DState, StateId};

/// Deterministic word automaton.
///
/// Every state represents one set of NFA states. The states standing for
/// the NFA's error and tag states are shared by every class that falls
/// back to them.
#[derive(Debug, Clone)]
pub struct Dfa {
    pub(crate) states: Vec<DState>,
    pub(crate) init: StateId,
    pub(crate) error: StateId,
    pub(crate) tag: StateId,
}

impl Dfa {
    pub fn init_state(&self) -> StateId {
        self.init
    }

    pub fn error_state(&self) -> StateId {
        self.error
    }

    pub fn tag_state(&self) -> StateId {
        self.tag
    }

    pub fn state(&self, id: StateId) -> &DState {
        &self.states[id as usize]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Successor of `state` on the (already uppercased) character `c`.
    #[inline]
    pub fn next(&self, state: StateId, c: char) -> StateId {
        self.states[state as usize].next(c).unwrap_or(state)
    }
}

/// Convert an NFA into an equivalent DFA.
///
/// Meant for a lambda-free automaton (see [`eliminate_lambdas`]); lambda
/// transitions that are still present are followed through their closures,
/// which gives the same result.
pub fn determinize(nfa: &Nfa) -> Dfa {
    let mut builder = PowersetBuilder::new(nfa);
    let init = builder.intern(vec![nfa.init_state()]);
    let error = builder.intern(vec![nfa.error_state()]);
    let tag = builder.intern(vec![nfa.tag_state()]);
    builder.run();

    log::debug!(
        "determinized {} NFA states into {} DFA states",
        nfa.len(),
        builder.states.len()
    );

    Dfa {
        states: builder.states,
        init,
        error,
        tag,
    }
}

/// Eliminate lambdas, then determinize.
pub fn full_determinize(nfa: &Nfa) -> Result<Dfa, FaError> {
    let lambda_free = eliminate_lambdas(nfa)?;
    Ok(determinize(&lambda_free))
}

/// Worklist state of the subset construction.
struct PowersetBuilder<'a> {
    nfa: &'a Nfa,
    states: Vec<DState>,
    /// Sorted NFA state sets already turned into DFA states.
    classes: HashMap<Vec<StateId>, StateId>,
    pending: Vec<(Vec<StateId>, StateId)>,
}

impl<'a> PowersetBuilder<'a> {
    fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            states: Vec::new(),
            classes: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Sort and deduplicate a class, then drop the error state if a live
    /// state is also present.
    ///
    /// The error thread only rejoins `init` at a boundary or enters the tag
    /// state at `<`; any live state does the same on those characters, so
    /// the error thread can never complete a word the live one would not.
    fn normalize(&self, mut class: Vec<StateId>) -> Vec<StateId> {
        class.sort_unstable();
        class.dedup();
        let (error, tag) = (self.nfa.error_state(), self.nfa.tag_state());
        if class.len() > 1
            && class.contains(&error)
            && class.iter().any(|&s| s != error && s != tag)
        {
            class.retain(|&s| s != error);
        }
        class
    }

    /// DFA state for a normalized class, creating it on first sight.
    fn intern(&mut self, class: Vec<StateId>) -> StateId {
        if let Some(&id) = self.classes.get(&class) {
            return id;
        }

        let mut actions: Vec<ActionId> = class
            .iter()
            .flat_map(|&s| self.nfa.state(s).actions.iter().copied())
            .collect();
        actions.sort_unstable();

        let id = self.states.len() as StateId;
        self.states.push(DState {
            actions,
            ..DState::new()
        });
        self.classes.insert(class.clone(), id);
        self.pending.push((class, id));
        id
    }

    fn run(&mut self) {
        let mut chars = Vec::new();
        let mut targets = Vec::new();

        while let Some((class, id)) = self.pending.pop() {
            let fallback_class = class.iter().map(|&s| self.nfa.fallback(s)).collect();
            let fallback_class = self.normalize(fallback_class);
            let fallback = self.intern(fallback_class);

            chars.clear();
            for &s in &class {
                self.nfa.explicit_chars(s, &mut chars);
            }
            chars.sort_unstable();
            chars.dedup();

            let mut transitions = HashMap::with_capacity(chars.len());
            for &c in &chars {
                targets.clear();
                for &s in &class {
                    self.nfa.step(s, c, &mut targets);
                }
                let target_class = self.normalize(targets.clone());
                let target = self.intern(target_class);
                // Entries that agree with the fallback are redundant
                if target != fallback {
                    transitions.insert(c, target);
                }
            }

            let state = &mut self.states[id as usize];
            state.transitions = transitions;
            state.default_state = Some(fallback);
        }
    }
}
