// Non-deterministic word automaton and word insertion

use wordindex_core::character::normalize_word;

use crate::FaError;
use crate::action::ActionId;
use crate::closure::lambda_closure;
use crate::config::MatchConfig;
use crate::state::{NState, StateId, Symbol};

/// Non-deterministic automaton recognizing a vocabulary of whole words.
///
/// Four states exist before any word is added:
///
/// - `init`: start of a token. Boundaries loop back to it, `<` enters the
///   tag state, anything else falls back to the error state.
/// - `tag`: inside markup. Only `>` leaves it (to `tag_exit`); every other
///   character stays here.
/// - `tag_exit`: just after markup; a lambda returns to `init`.
/// - `error`: inside a token that matches no word. Waits for a boundary
///   (back to `init`) or `<` (tag state).
///
/// Each word adds a chain of single-character states from `init`, shared
/// with any word that has the same prefix, and one end state entered on
/// a boundary after the last character. The end state fires the word's
/// action and has a lambda back to `init`.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub(crate) states: Vec<NState>,
    pub(crate) init: StateId,
    pub(crate) tag: StateId,
    pub(crate) tag_exit: StateId,
    pub(crate) error: StateId,
    pub(crate) config: MatchConfig,
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

impl Nfa {
    /// Create an empty automaton with the default delimiters.
    pub fn new() -> Self {
        Self::build(MatchConfig::default().normalized())
    }

    /// Create an empty automaton with custom delimiters.
    ///
    /// Fails with [`FaError::InvalidConfig`] when there is no boundary, or
    /// when a tag character doubles as a boundary or as the other tag
    /// character.
    pub fn with_config(config: MatchConfig) -> Result<Self, FaError> {
        let config = config.normalized();
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MatchConfig) -> Self {
        let (init, tag, tag_exit, error) = (0, 1, 2, 3);

        let mut init_state = NState::with_default(error);
        let mut tag_state = NState::new();
        let mut tag_exit_state = NState::with_default(error);
        let mut error_state = NState::new();

        for &b in &config.boundaries {
            init_state.add_target(Symbol::Char(b), init);
            error_state.add_target(Symbol::Char(b), init);
        }
        init_state.add_target(Symbol::Char(config.tag_open), tag);
        error_state.add_target(Symbol::Char(config.tag_open), tag);
        tag_state.add_target(Symbol::Char(config.tag_close), tag_exit);
        tag_exit_state.add_target(Symbol::Lambda, init);

        Self {
            states: vec![init_state, tag_state, tag_exit_state, error_state],
            init,
            tag,
            tag_exit,
            error,
            config,
        }
    }

    /// Insert `word` so that it fires `action` each time it appears as a
    /// complete token outside markup.
    ///
    /// The word is uppercased first. Existing prefix states are reused.
    /// Inserting the same word again adds a second end state, so both
    /// actions fire.
    pub fn add_word(&mut self, word: &str, action: ActionId) -> Result<(), FaError> {
        let chars = normalize_word(word);
        if chars.is_empty() {
            return Err(FaError::InvalidWord {
                word: word.to_string(),
                reason: "empty word",
            });
        }
        if chars.iter().any(|&c| self.config.is_delimiter(c)) {
            return Err(FaError::InvalidWord {
                word: word.to_string(),
                reason: "contains a boundary or tag character",
            });
        }

        let mut current = self.init;
        for &c in &chars {
            let existing = self.states[current as usize]
                .targets(c)
                .and_then(|targets| targets.first().copied());
            current = match existing {
                Some(next) => next,
                None => {
                    let next = self.push_chain_state();
                    self.states[current as usize].add_target(Symbol::Char(c), next);
                    next
                }
            };
        }

        let mut end_state = NState::with_default(self.error);
        end_state.add_target(Symbol::Lambda, self.init);
        end_state.actions.push(action);
        let end = self.push(end_state);

        let init = self.init;
        let last = &mut self.states[current as usize];
        for &b in &self.config.boundaries {
            let targets = last.transitions.entry(Symbol::Char(b)).or_default();
            targets.retain(|&t| t != init);
            last.add_target(Symbol::Char(b), end);
        }
        Ok(())
    }

    /// A word-internal state: boundaries resynchronize at `init`, `<` enters
    /// markup, anything that does not continue a word is an error.
    fn push_chain_state(&mut self) -> StateId {
        let mut state = NState::with_default(self.error);
        for &b in &self.config.boundaries {
            state.add_target(Symbol::Char(b), self.init);
        }
        state.add_target(Symbol::Char(self.config.tag_open), self.tag);
        self.push(state)
    }

    fn push(&mut self, state: NState) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(state);
        id
    }

    pub fn init_state(&self) -> StateId {
        self.init
    }

    pub fn tag_state(&self) -> StateId {
        self.tag
    }

    pub fn tag_exit_state(&self) -> StateId {
        self.tag_exit
    }

    pub fn error_state(&self) -> StateId {
        self.error
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self, id: StateId) -> &NState {
        &self.states[id as usize]
    }

    /// Number of states in the arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// True if any state still has lambda transitions.
    pub fn has_lambdas(&self) -> bool {
        self.states.iter().any(|s| !s.lambdas().is_empty())
    }

    /// Fallback of `state`: its default state, or itself when it has none.
    #[inline]
    pub fn fallback(&self, state: StateId) -> StateId {
        self.states[state as usize].default_state.unwrap_or(state)
    }

    /// Append the states reached from `state` on `c` to `out`.
    ///
    /// Explicit transitions of every state in the lambda closure of `state`
    /// are used first; if there are none the fallback applies. On a
    /// lambda-free automaton this is a plain table lookup.
    pub fn step(&self, state: StateId, c: char, out: &mut Vec<StateId>) {
        let s = &self.states[state as usize];
        if s.lambdas().is_empty() {
            match s.targets(c) {
                Some(targets) => out.extend_from_slice(targets),
                None => out.push(self.fallback(state)),
            }
            return;
        }

        let before = out.len();
        for member in lambda_closure(self, state) {
            if let Some(targets) = self.states[member as usize].targets(c) {
                out.extend_from_slice(targets);
            }
        }
        if out.len() == before {
            out.push(self.fallback(state));
        }
    }

    /// Append every character with an explicit transition from `state`
    /// (or from a state in its lambda closure) to `out`.
    pub(crate) fn explicit_chars(&self, state: StateId, out: &mut Vec<char>) {
        let collect = |member: StateId, out: &mut Vec<char>| {
            for symbol in self.states[member as usize].transitions.keys() {
                if let Symbol::Char(c) = *symbol {
                    out.push(c);
                }
            }
        };
        if self.states[state as usize].lambdas().is_empty() {
            collect(state, out);
        } else {
            for member in lambda_closure(self, state) {
                collect(member, out);
            }
        }
    }
}
