//! Simulation-based state reduction and minimization.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{compute_relation, Map, Nfa, State};

/// Maps original state indices to their representative state in a reduced
/// automaton.
pub type StateRenaming = Map<State, State>;

/// Quotients `aut` by simulation equivalence.
///
/// States that simulate each other are merged into one class state; class
/// ids are handed out in order of first occurrence, and two original
/// states share a result state exactly when they are simulation
/// equivalent. Outgoing transitions are taken from the class
/// representative (the smallest member), and a transition to a target
/// class is dropped when a different target's representative already
/// simulates it.
pub fn reduce(aut: &Nfa) -> (Nfa, StateRenaming) {
    let simulation = compute_relation(aut);
    let mut symmetric = simulation.clone();
    symmetric.restrict_to_symmetric();
    let quotient_projection = symmetric.get_quotient_projection();

    let mut result = Nfa::new();
    let mut state_map = StateRenaming::default();
    for q in 0..aut.size() {
        let representative = quotient_projection[q];
        match state_map.get(&representative).copied() {
            Some(class_state) => {
                state_map.insert(q, class_state);
            }
            None => {
                let class_state = result.add_state();
                state_map.insert(representative, class_state);
                state_map.insert(q, class_state);
            }
        }
    }

    for q in 0..aut.size() {
        let class_state = state_map[&q];
        if aut.has_initial(q) {
            result.set_initial(class_state);
        }
        if quotient_projection[q] != q {
            continue;
        }
        // Only the representative contributes transitions; that is enough
        // under simulation equivalence.
        for sp in aut.symbol_posts(q) {
            let representatives: BTreeSet<State> = sp
                .targets()
                .iter()
                .map(|&target| quotient_projection[target])
                .collect();
            for &target in &representatives {
                let subsumed = representatives
                    .iter()
                    .any(|&other| other != target && simulation.get(target, other));
                if !subsumed {
                    result.add_transition(class_state, sp.symbol(), state_map[&target]);
                }
            }
        }
        if aut.has_final(q) {
            result.set_final(class_state);
        }
    }

    debug!(
        "Simulation reduction merged {} states into {}",
        aut.size(),
        result.size()
    );
    (result, state_map)
}

/// Produces a language-equivalent automaton with at most as many
/// transitions as `aut`, by trimming and merging simulation-equivalent
/// states. The result may stay nondeterministic; no canonical minimal NFA
/// is promised.
pub fn minimize(aut: &Nfa) -> Nfa {
    let mut trimmed = aut.clone();
    trimmed.trim();
    reduce(&trimmed).0
}
