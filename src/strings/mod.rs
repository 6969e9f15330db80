//! String-solving support built on the automaton core: shortest-word
//! extraction, separator-depth segmentation and noodlification for word
//! equations.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{Nfa, State, Word};

mod segmentation;
pub use segmentation::Segmentation;

mod noodlify;
pub use noodlify::{noodlify, noodlify_for_equation};

/// The set of shortest words accepted by `aut`; empty when the language
/// is empty. The empty word alone is returned when the automaton accepts
/// it at distance zero.
pub fn shortest_words(aut: &Nfa) -> BTreeSet<Word> {
    // Distance from each state to the nearest final state.
    let mut distance: BTreeMap<State, usize> = BTreeMap::new();
    let mut worklist: VecDeque<State> = VecDeque::new();
    for &q in aut.final_states() {
        distance.insert(q, 0);
        worklist.push_back(q);
    }
    let reverted = aut.revert();
    while let Some(state) = worklist.pop_front() {
        let next = distance[&state] + 1;
        for sp in reverted.symbol_posts(state) {
            for &target in sp.targets() {
                if !distance.contains_key(&target) {
                    distance.insert(target, next);
                    worklist.push_back(target);
                }
            }
        }
    }

    let Some(&best) = aut
        .initial_states()
        .iter()
        .filter_map(|q| distance.get(q))
        .min()
    else {
        return BTreeSet::new();
    };

    // Enumerate suffixes by increasing distance: a shortest word from a
    // state steps to any successor one level closer to acceptance.
    let mut suffixes: BTreeMap<State, BTreeSet<Word>> = BTreeMap::new();
    for level in 0..=best {
        for (&state, &d) in &distance {
            if d != level {
                continue;
            }
            let mut words = BTreeSet::new();
            if level == 0 {
                words.insert(Word::new());
            } else {
                for sp in aut.symbol_posts(state) {
                    for &target in sp.targets() {
                        if distance.get(&target) == Some(&(level - 1)) {
                            for suffix in &suffixes[&target] {
                                let mut word = Word::with_capacity(level);
                                word.push(sp.symbol());
                                word.extend_from_slice(suffix);
                                words.insert(word);
                            }
                        }
                    }
                }
            }
            suffixes.insert(state, words);
        }
    }

    aut.initial_states()
        .iter()
        .filter(|q| distance.get(q) == Some(&best))
        .flat_map(|q| suffixes[q].iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::divisible_by;
    use crate::Nfa;
    use pretty_assertions::assert_eq;

    #[test]
    fn shortest_word_of_the_chain_automaton() {
        assert_eq!(
            shortest_words(&divisible_by(2)),
            BTreeSet::from([vec![1, 1]])
        );
    }

    #[test]
    fn empty_language_has_no_shortest_words() {
        let mut aut = Nfa::with_size(2);
        aut.set_initial(0);
        aut.add_transition(0, 3, 1);
        assert!(shortest_words(&aut).is_empty());
    }

    #[test]
    fn accepting_initial_state_yields_the_empty_word() {
        let mut aut = Nfa::with_size(2);
        aut.set_initial(0);
        aut.set_final(0);
        aut.add_transition(0, 3, 1);
        aut.set_final(1);
        assert_eq!(shortest_words(&aut), BTreeSet::from([Word::new()]));
    }

    #[test]
    fn branching_automaton_returns_every_shortest_word() {
        let mut aut = Nfa::with_size(3);
        aut.set_initial(0);
        aut.add_transition(0, 1, 2);
        aut.add_transition(0, 2, 2);
        aut.add_transition(0, 3, 1);
        aut.add_transition(1, 4, 2);
        aut.set_final(2);
        assert_eq!(
            shortest_words(&aut),
            BTreeSet::from([vec![1], vec![2]])
        );
    }
}
