// Enumeration of reachable states for export tools

use std::hash::Hash;

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::state::{State, StateId, Symbol};

/// One reachable state as seen by an exporter.
///
/// Identifiers are assigned in visiting order for this traversal only
/// (the initial state is always 0) and do not match arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord<L> {
    pub id: usize,
    pub is_end: bool,
    /// Outgoing edges sorted by label, then destination.
    pub transitions: Vec<(L, usize)>,
    pub default_state: Option<usize>,
}

impl Nfa {
    /// Every state reachable from the initial state, depth first.
    pub fn states(&self) -> Vec<StateRecord<Symbol>> {
        walk(&self.states, self.init, Vec::as_slice)
    }
}

impl Dfa {
    /// Every state reachable from the initial state, depth first.
    pub fn states(&self) -> Vec<StateRecord<char>> {
        walk(&self.states, self.init, std::slice::from_ref)
    }
}

fn walk<K, T, F>(states: &[State<K, T>], init: StateId, targets: F) -> Vec<StateRecord<K>>
where
    K: Copy + Ord + Eq + Hash,
    F: Fn(&T) -> &[StateId],
{
    let edges = |state: &State<K, T>| -> Vec<(K, StateId)> {
        let mut out: Vec<(K, StateId)> = state
            .transitions
            .iter()
            .flat_map(|(&label, t)| targets(t).iter().map(move |&to| (label, to)))
            .collect();
        out.sort_unstable();
        out
    };

    let mut ids: Vec<Option<usize>> = vec![None; states.len()];
    let mut order = Vec::new();
    let mut stack = vec![init];

    while let Some(current) = stack.pop() {
        if ids[current as usize].is_some() {
            continue;
        }
        ids[current as usize] = Some(order.len());
        order.push(current);

        let state = &states[current as usize];
        // Pushed in reverse so the smallest label is explored first and the
        // fallback last.
        if let Some(fallback) = state.default_state {
            stack.push(fallback);
        }
        for (_, to) in edges(state).into_iter().rev() {
            if ids[to as usize].is_none() {
                stack.push(to);
            }
        }
    }

    order
        .iter()
        .filter_map(|&s| {
            let state = &states[s as usize];
            Some(StateRecord {
                id: ids[s as usize]?,
                is_end: state.is_end_state(),
                transitions: edges(state)
                    .into_iter()
                    .filter_map(|(label, to)| Some((label, ids[to as usize]?)))
                    .collect(),
                default_state: state.default_state.and_then(|d| ids[d as usize]),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionId;
    use crate::dfa::full_determinize;

    fn sample() -> Nfa {
        let mut nfa = Nfa::new();
        nfa.add_word("ab", ActionId::new(0)).unwrap();
        nfa
    }

    #[test]
    fn nfa_enumeration_covers_every_state() {
        let nfa = sample();
        let records = nfa.states();
        assert_eq!(records.len(), nfa.len());
        assert_eq!(records[0].id, 0);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.id, i);
        }
        assert_eq!(records.iter().filter(|r| r.is_end).count(), 1);
    }

    #[test]
    fn nfa_enumeration_lists_lambdas() {
        let nfa = sample();
        let records = nfa.states();
        let end = records.iter().find(|r| r.is_end).unwrap();
        assert_eq!(end.transitions, vec![(Symbol::Lambda, 0)]);
    }

    #[test]
    fn dfa_enumeration_is_stable() {
        let dfa = full_determinize(&sample()).unwrap();
        let first = dfa.states();
        let second = dfa.states();
        assert_eq!(first, second);
        assert_eq!(first.len(), dfa.len());
        assert!(first.iter().all(|r| r.default_state.is_some()));
    }

    #[test]
    fn edges_are_sorted() {
        let dfa = full_determinize(&sample()).unwrap();
        for record in dfa.states() {
            let mut sorted = record.transitions.clone();
            sorted.sort_unstable();
            assert_eq!(record.transitions, sorted);
        }
    }
}
