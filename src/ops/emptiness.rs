//! Language emptiness with shortest-path witnesses.

use std::collections::VecDeque;

use crate::{Map, Nfa, Run, State, Word};

/// True iff no final state is reachable from an initial state.
pub fn is_lang_empty(aut: &Nfa) -> bool {
    lang_empty_with_witness(aut).0
}

/// Emptiness check that also produces a witness: the shortest state path
/// from an initial to a final state together with a word read along it.
/// The witness is empty when the language is empty; an initial state that
/// is itself final yields a singleton path and the empty word.
pub fn lang_empty_with_witness(aut: &Nfa) -> (bool, Run) {
    let mut worklist: VecDeque<State> = aut.initial_states().iter().copied().collect();
    // predecessors[s] == s marks an initial state.
    let mut predecessors: Map<State, State> = aut
        .initial_states()
        .iter()
        .map(|&q| (q, q))
        .collect();

    while let Some(state) = worklist.pop_front() {
        if aut.has_final(state) {
            let mut path = vec![state];
            let mut current = state;
            while predecessors[&current] != current {
                current = predecessors[&current];
                path.push(current);
            }
            path.reverse();
            let (word, _) = word_for_path(aut, &path);
            return (false, Run { word, path });
        }
        for sp in aut.symbol_posts(state) {
            for &target in sp.targets() {
                if !predecessors.contains_key(&target) {
                    predecessors.insert(target, state);
                    worklist.push_back(target);
                }
            }
        }
    }
    (true, Run::default())
}

/// Reads off a word along `path`, validating that each consecutive state
/// pair is connected by some transition. Returns the symbol sequence and
/// `true` when the whole path is valid, otherwise an empty word and
/// `false` at the first break. The symbol chosen between two states is
/// the smallest one connecting them.
pub fn word_for_path(aut: &Nfa, path: &[State]) -> (Word, bool) {
    let mut word = Word::new();
    for window in path.windows(2) {
        let (current, next) = (window[0], window[1]);
        let symbol = aut
            .symbol_posts(current)
            .iter()
            .find(|sp| sp.targets().binary_search(&next).is_ok())
            .map(|sp| sp.symbol());
        match symbol {
            Some(symbol) => word.push(symbol),
            None => return (Word::new(), false),
        }
    }
    (word, true)
}
