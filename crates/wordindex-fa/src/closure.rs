// Lambda closures and lambda elimination

use hashbrown::{HashMap, HashSet};

use crate::FaError;
use crate::nfa::Nfa;
use crate::state::{NState, StateId, Symbol};

/// States reachable from `state` through lambda transitions only,
/// including `state` itself. Returned sorted.
///
/// Lambda cycles are possible (end states loop back to `init`), so the
/// traversal keeps a visited set and uses an explicit stack.
pub fn lambda_closure(nfa: &Nfa, state: StateId) -> Vec<StateId> {
    let mut visited = HashSet::new();
    visited.insert(state);
    let mut stack = vec![state];

    while let Some(current) = stack.pop() {
        for &next in nfa.state(current).lambdas() {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }

    let mut closure: Vec<StateId> = visited.into_iter().collect();
    closure.sort_unstable();
    closure
}

/// Return an equivalent automaton without lambda transitions.
///
/// For every state, the transition on each character becomes the union of
/// that character's transitions over the state's lambda closure. Fallbacks,
/// end markers and actions stay with the state itself; merging actions is
/// left to determinization. State identifiers are preserved, and the input
/// automaton is not modified.
///
/// Fails with [`FaError::UnreachableState`] if some state cannot be reached
/// from the initial state.
pub fn eliminate_lambdas(nfa: &Nfa) -> Result<Nfa, FaError> {
    check_reachable(nfa)?;

    let mut states = Vec::with_capacity(nfa.len());
    for id in 0..nfa.len() as StateId {
        let source = nfa.state(id);
        let mut transitions: HashMap<Symbol, Vec<StateId>> = HashMap::new();

        for member in lambda_closure(nfa, id) {
            for (&symbol, targets) in &nfa.state(member).transitions {
                if symbol == Symbol::Lambda {
                    continue;
                }
                let merged = transitions.entry(symbol).or_default();
                merged.extend_from_slice(targets);
            }
        }
        for targets in transitions.values_mut() {
            targets.sort_unstable();
            targets.dedup();
        }

        states.push(NState {
            transitions,
            default_state: source.default_state,
            actions: source.actions.clone(),
        });
    }

    Ok(Nfa {
        states,
        init: nfa.init,
        tag: nfa.tag,
        tag_exit: nfa.tag_exit,
        error: nfa.error,
        config: nfa.config.clone(),
    })
}

/// Visit every state reachable from `init` through transitions, lambdas
/// and fallbacks; report the first one that was missed.
fn check_reachable(nfa: &Nfa) -> Result<(), FaError> {
    let mut visited = vec![false; nfa.len()];
    let mut stack = vec![nfa.init_state()];
    visited[nfa.init_state() as usize] = true;

    while let Some(current) = stack.pop() {
        let state = nfa.state(current);
        let successors = state
            .transitions
            .values()
            .flatten()
            .chain(state.default_state.iter());
        for &next in successors {
            if !visited[next as usize] {
                visited[next as usize] = true;
                stack.push(next);
            }
        }
    }

    match visited.iter().position(|&v| !v) {
        Some(missed) => Err(FaError::UnreachableState(missed as StateId)),
        None => Ok(()),
    }
}
