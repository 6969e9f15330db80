//! Subset construction.

use std::collections::BTreeSet;

use tracing::trace;

use crate::{Map, Nfa, State, Symbol};

/// Maps each discovered subset of original states (as a sorted vector) to
/// the state representing it in the determinized automaton.
pub type SubsetMap = Map<Vec<State>, State>;

/// Determinizes `aut` by the subset construction.
///
/// The subset of initial states becomes state 0; further states are
/// numbered in the order their subsets are first discovered. A subset is
/// final iff it intersects the original final set. The empty subset is
/// never materialized. Feeding a DFA yields an isomorphic renumbering.
pub fn determinize(aut: &Nfa) -> (Nfa, SubsetMap) {
    let mut result = Nfa::new();
    let mut subset_map = SubsetMap::default();

    let initial_subset: Vec<State> = aut.initial_states().iter().copied().collect();
    let initial_id = result.add_state();
    result.set_initial(initial_id);
    if initial_subset.iter().any(|&q| aut.has_final(q)) {
        result.set_final(initial_id);
    }
    subset_map.insert(initial_subset.clone(), initial_id);

    let mut worklist: Vec<(State, Vec<State>)> = vec![(initial_id, initial_subset)];
    while let Some((subset_id, subset)) = worklist.pop() {
        let symbols: BTreeSet<Symbol> = subset
            .iter()
            .flat_map(|&q| aut.symbol_posts(q).iter().map(|sp| sp.symbol()))
            .collect();

        for symbol in symbols {
            let target_subset: Vec<State> = aut.post(subset.iter(), symbol).into_iter().collect();
            if target_subset.is_empty() {
                continue;
            }
            let target_id = match subset_map.get(&target_subset).copied() {
                Some(id) => id,
                None => {
                    let id = result.add_state();
                    if target_subset.iter().any(|&q| aut.has_final(q)) {
                        result.set_final(id);
                    }
                    subset_map.insert(target_subset.clone(), id);
                    worklist.push((id, target_subset.clone()));
                    id
                }
            };
            result.add_transition(subset_id, symbol, target_id);
        }
    }

    trace!(
        "Determinized {} states into {} subsets",
        aut.size(),
        result.size()
    );
    (result, subset_map)
}
