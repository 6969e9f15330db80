//! Language concatenation.

use crate::{Nfa, EPSILON};

/// Concatenates the languages of `lhs` and `rhs`. The result copies `lhs`
/// unchanged and appends `rhs` shifted by `lhs.size()`; its initial states
/// are those of `lhs` and its final states the shifted finals of `rhs`.
///
/// With `use_epsilon` the parts are bridged by one [`EPSILON`] transition
/// from every final state of `lhs` to every shifted initial state of
/// `rhs`, keeping a clean boundary. Without it, the shifted initial
/// states' outgoing transitions are copied onto every final state of
/// `lhs` (and `lhs` finals stay final when `rhs` accepts the empty word).
///
/// If either operand has no initial or no final state its language is
/// empty (or cannot contribute), and the empty automaton is returned.
pub fn concatenate(lhs: &Nfa, rhs: &Nfa, use_epsilon: bool) -> Nfa {
    if lhs.initial_states().is_empty()
        || lhs.final_states().is_empty()
        || rhs.initial_states().is_empty()
        || rhs.final_states().is_empty()
    {
        return Nfa::new();
    }

    let offset = lhs.size();
    let mut result = lhs.clone();
    result.clear_final();
    result.resize(offset + rhs.size()).expect("growing never fails");

    for t in rhs.transitions() {
        result.add_transition(t.source + offset, t.symbol, t.target + offset);
    }
    for &q in rhs.final_states() {
        result.set_final(q + offset);
    }

    if use_epsilon {
        for &f in lhs.final_states() {
            for &i in rhs.initial_states() {
                result.add_transition(f, EPSILON, i + offset);
            }
        }
    } else {
        let rhs_accepts_epsilon = rhs
            .initial_states()
            .iter()
            .any(|&i| rhs.has_final(i));
        for &f in lhs.final_states() {
            for &i in rhs.initial_states() {
                let moves: Vec<_> = result.transitions_from(i + offset).collect();
                for t in moves {
                    result.add_transition(f, t.symbol, t.target);
                }
            }
            if rhs_accepts_epsilon {
                result.set_final(f);
            }
        }
    }
    result
}
