//! Word membership queries.

use std::collections::BTreeSet;

use crate::{Nfa, State, Symbol, EPSILON};

/// True iff `word` is accepted: folding the post function over the word
/// from the initial set ends in a set that meets the final states.
pub fn is_in_lang(aut: &Nfa, word: &[Symbol]) -> bool {
    let mut current: BTreeSet<State> = aut.initial_states().clone();
    for &symbol in word {
        current = aut.post(&current, symbol);
        if current.is_empty() {
            return false;
        }
    }
    current.iter().any(|&q| aut.has_final(q))
}

/// True iff some prefix of `word` (possibly the whole word) is accepted.
pub fn is_prefix_in_lang(aut: &Nfa, word: &[Symbol]) -> bool {
    let mut current: BTreeSet<State> = aut.initial_states().clone();
    for &symbol in word {
        if current.iter().any(|&q| aut.has_final(q)) {
            return true;
        }
        current = aut.post(&current, symbol);
        if current.is_empty() {
            return false;
        }
    }
    current.iter().any(|&q| aut.has_final(q))
}

/// True iff the empty word is accepted: the epsilon closure of the
/// initial set meets the final states.
pub fn accepts_epsilon(aut: &Nfa) -> bool {
    let mut closure: BTreeSet<State> = aut.initial_states().clone();
    let mut worklist: Vec<State> = closure.iter().copied().collect();
    while let Some(state) = worklist.pop() {
        if let Some(sp) = aut.symbol_post(state, EPSILON) {
            for &target in sp.targets() {
                if closure.insert(target) {
                    worklist.push(target);
                }
            }
        }
    }
    closure.iter().any(|&q| aut.has_final(q))
}
